//! Tests for report file loading.

use std::fs;
use std::path::{Path, PathBuf};

use faers_ingest::{DEFAULT_PATTERN, IngestError, PatidScheme, list_report_files, load_reports};
use tempfile::TempDir;

fn quarter_dir(root: &TempDir) -> PathBuf {
    let dir = root.path().join("2020").join("q1");
    fs::create_dir_all(&dir).expect("create quarter dir");
    dir
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn assigns_positional_patient_ids() {
    let root = TempDir::new().unwrap();
    let dir = quarter_dir(&root);
    let path = write(
        &dir,
        "drug-event-0001-of-0002.json",
        r#"{"meta": {}, "results": [{"serious": "1"}, {"serious": "2"}, {}]}"#,
    );

    let records = load_reports(&path, &PatidScheme::default()).expect("load");
    let ids: Vec<&str> = records.iter().map(|r| r.patid.as_str()).collect();
    assert_eq!(ids, vec!["2020_q1_0001_0", "2020_q1_0001_1", "2020_q1_0001_2"]);
    assert_eq!(records[1].body["serious"], "2");
}

#[test]
fn reloading_is_idempotent() {
    let root = TempDir::new().unwrap();
    let dir = quarter_dir(&root);
    let path = write(&dir, "drug-event-0002-of-0002.json", r#"{"results": [{}, {}]}"#);

    let scheme = PatidScheme::default();
    let first = load_reports(&path, &scheme).expect("first load");
    let second = load_reports(&path, &scheme).expect("second load");
    assert_eq!(first, second);
}

#[test]
fn empty_results_yield_no_records() {
    let root = TempDir::new().unwrap();
    let dir = quarter_dir(&root);
    let path = write(&dir, "drug-event-0001-of-0001.json", r#"{"results": []}"#);
    assert!(load_reports(&path, &PatidScheme::default()).unwrap().is_empty());
}

#[test]
fn malformed_sources_are_fatal() {
    let root = TempDir::new().unwrap();
    let dir = quarter_dir(&root);
    let scheme = PatidScheme::default();

    let truncated = write(&dir, "drug-event-0001-of-0003.json", r#"{"results": [{"#);
    assert!(matches!(
        load_reports(&truncated, &scheme),
        Err(IngestError::Json { .. })
    ));

    let unwrapped = write(&dir, "drug-event-0002-of-0003.json", r#"[{"serious": "1"}]"#);
    assert!(matches!(
        load_reports(&unwrapped, &scheme),
        Err(IngestError::MissingResults { .. })
    ));

    let scalar = write(&dir, "drug-event-0003-of-0003.json", r#"{"results": 3}"#);
    assert!(matches!(
        load_reports(&scalar, &scheme),
        Err(IngestError::ResultsNotArray { .. })
    ));
}

#[test]
fn discovery_feeds_loader() {
    let root = TempDir::new().unwrap();
    let dir = quarter_dir(&root);
    write(&dir, "drug-event-0002-of-0002.json", r#"{"results": [{}]}"#);
    write(&dir, "drug-event-0001-of-0002.json", r#"{"results": [{}, {}]}"#);
    write(&dir, "notes.md", "ignored");

    let scheme = PatidScheme::default();
    let files = list_report_files(&dir, DEFAULT_PATTERN).expect("list");
    let ids: Vec<String> = files
        .iter()
        .flat_map(|path| load_reports(path, &scheme).expect("load"))
        .map(|record| record.patid.to_string())
        .collect();
    assert_eq!(
        ids,
        vec!["2020_q1_0001_0", "2020_q1_0001_1", "2020_q1_0002_0"]
    );
}
