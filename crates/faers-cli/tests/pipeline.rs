//! End-to-end tests for the ingest pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use faers_cli::config::{FileConfig, IngestConfig, Overrides};
use faers_cli::pipeline::{WriteMode, run_ingest};
use faers_model::{Dataset, ReactionPolicy};
use tempfile::TempDir;

const FILE_ONE: &str = r#"{
  "meta": {"disclaimer": "test"},
  "results": [
    {
      "serious": "1",
      "receivedate": "20200105",
      "primarysource": {"qualification": "1", "reportercountry": "US"},
      "patient": {
        "patientsex": "2",
        "patientonsetage": "63",
        "drug": [
          {"medicinalproduct": "ASPIRIN", "drugcharacterization": "1",
           "openfda": {"route": ["ORAL"]}},
          {"medicinalproduct": "IBUPROFEN",
           "activesubstance": {"activesubstancename": "IBUPROFEN"}}
        ],
        "reaction": [
          {"reactionmeddrapt": "NAUSEA", "reactionoutcome": "1"},
          {"reactionmeddrapt": "HEADACHE"}
        ]
      }
    },
    {
      "serious": "2",
      "patient": {"patientsex": "1"}
    }
  ]
}"#;

const FILE_TWO: &str = r#"{"results": [
  {"patient": {"drug": [{"medicinalproduct": "TYLENOL"}]}}
]}"#;

struct Fixture {
    _root: TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn fixture() -> Fixture {
    let root = TempDir::new().expect("temp dir");
    let input = root.path().join("raw").join("2020").join("q1");
    fs::create_dir_all(&input).expect("create input");
    fs::write(input.join("drug-event-0001-of-0002.json"), FILE_ONE).expect("write one");
    fs::write(input.join("drug-event-0002-of-0002.json"), FILE_TWO).expect("write two");
    let output = root.path().join("data");
    Fixture {
        _root: root,
        input,
        output,
    }
}

fn config(fixture: &Fixture, overrides: Overrides) -> IngestConfig {
    let overrides = Overrides {
        input_dir: Some(fixture.input.clone()),
        output_dir: Some(fixture.output.clone()),
        label: Some("2020".to_string()),
        ..overrides
    };
    IngestConfig::resolve(overrides, FileConfig::default()).expect("resolve config")
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read output")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn writes_both_datasets() {
    let fixture = fixture();
    let result = run_ingest(&config(&fixture, Overrides::default())).expect("run");

    assert_eq!(result.datasets.len(), 2);
    assert!(!result.has_errors());

    let drugs = read_lines(&fixture.output.join("drugs_2020.csv"));
    assert_eq!(
        drugs,
        vec![
            "activesubstance.activesubstancename,drugindication,drugcharacterization,\
             medicinalproduct,openfda.route,openfda.product_type,patid",
            ",,1,ASPIRIN,\"[\"\"ORAL\"\"]\",,2020_q1_0001_0",
            "IBUPROFEN,,,IBUPROFEN,,,2020_q1_0001_0",
            ",,,TYLENOL,,,2020_q1_0002_0",
        ]
    );

    let drug_run = &result.datasets[0];
    assert_eq!(drug_run.dataset, Dataset::Drugs);
    assert_eq!(drug_run.files, 2);
    assert_eq!(drug_run.reports, 3);
    assert_eq!(drug_run.empty_reports, 1);
    assert_eq!(drug_run.rows, 3);

    let other = read_lines(&fixture.output.join("other_2020.csv"));
    assert_eq!(other.len(), 4);
    assert!(other[0].starts_with("primarysource.qualification,receivedate,receiptdate,"));
    assert!(other[0].ends_with("reactionmeddrapt,reactionoutcome,patid"));
    assert_eq!(
        other[1],
        "1,20200105,,US,63,2,,,1,,,,,,NAUSEA,1,2020_q1_0001_0"
    );
    assert_eq!(other[2], ",,,,,1,,,2,,,,,,,,2020_q1_0001_1");
    assert_eq!(other[3], ",,,,,,,,,,,,,,,,2020_q1_0002_0");
}

#[test]
fn default_label_names_outputs_by_year() {
    let fixture = fixture();
    let overrides = Overrides {
        input_dir: Some(fixture.input.clone()),
        output_dir: Some(fixture.output.clone()),
        ..Overrides::default()
    };
    let config = IngestConfig::resolve(overrides, FileConfig::default()).expect("resolve config");
    assert_eq!(config.label, "2020");

    run_ingest(&config).expect("run");
    assert!(fixture.output.join("drugs_2020.csv").exists());
    assert!(fixture.output.join("other_2020.csv").exists());
    assert!(!fixture.output.join("drugs_q1.csv").exists());
}

#[test]
fn per_reaction_policy_expands_rows() {
    let fixture = fixture();
    let overrides = Overrides {
        datasets: Some(vec![Dataset::Demographics]),
        reactions: Some(ReactionPolicy::PerReaction),
        ..Overrides::default()
    };
    let result = run_ingest(&config(&fixture, overrides)).expect("run");

    assert_eq!(result.datasets.len(), 1);
    assert!(!fixture.output.join("drugs_2020.csv").exists());
    let other = read_lines(&fixture.output.join("other_2020.csv"));
    assert_eq!(other.len(), 1 + 4);
    assert!(other[2].ends_with("HEADACHE,,2020_q1_0001_0"));
}

#[test]
fn per_file_mode_matches_accumulate() {
    let accumulate = fixture();
    run_ingest(&config(&accumulate, Overrides::default())).expect("accumulate run");

    let per_file = fixture();
    let overrides = Overrides {
        write_mode: Some(WriteMode::PerFile),
        ..Overrides::default()
    };
    run_ingest(&config(&per_file, overrides)).expect("per-file run");

    for name in ["drugs_2020.csv", "other_2020.csv"] {
        assert_eq!(
            read_lines(&accumulate.output.join(name)),
            read_lines(&per_file.output.join(name)),
            "{name}"
        );
    }
}

#[test]
fn malformed_source_aborts_by_default() {
    let fixture = fixture();
    fs::write(fixture.input.join("drug-event-0003-of-0003.json"), "{\"meta\": {}}")
        .expect("write malformed");

    let err = run_ingest(&config(&fixture, Overrides::default())).unwrap_err();
    assert!(format!("{err:#}").contains("missing top-level 'results' key"));
    assert!(!fixture.output.join("drugs_2020.csv").exists());
}

#[test]
fn skip_malformed_continues() {
    let fixture = fixture();
    fs::write(fixture.input.join("drug-event-0003-of-0003.json"), "not json")
        .expect("write malformed");

    let overrides = Overrides {
        skip_malformed: true,
        ..Overrides::default()
    };
    let result = run_ingest(&config(&fixture, overrides)).expect("run");

    assert!(result.has_errors());
    for run in &result.datasets {
        assert_eq!(run.files, 2);
        assert_eq!(run.skipped.len(), 1);
    }
    assert_eq!(read_lines(&fixture.output.join("drugs_2020.csv")).len(), 4);
}

#[test]
fn dry_run_writes_nothing() {
    let fixture = fixture();
    let overrides = Overrides {
        dry_run: true,
        ..Overrides::default()
    };
    let result = run_ingest(&config(&fixture, overrides)).expect("run");

    assert!(result.datasets.iter().all(|run| run.output.is_none()));
    assert_eq!(result.datasets[1].rows, 3);
    assert!(!fixture.output.exists());
}
