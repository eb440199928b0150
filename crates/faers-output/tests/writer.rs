//! Tests for the incremental CSV writer.

use std::fs;

use faers_model::{CellValue, FlatRow, FlatTable, PatientId};
use faers_output::{IncrementalCsvWriter, write_tables};
use tempfile::TempDir;

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn table(columns: &[&str], rows: &[(&str, Vec<CellValue>)]) -> FlatTable {
    let mut table = FlatTable::new(columns.iter().copied());
    for (patid, cells) in rows {
        table.push_row(FlatRow {
            patid: PatientId::new(*patid).unwrap(),
            cells: cells.clone(),
        });
    }
    table
}

fn drug_tables() -> Vec<FlatTable> {
    let columns = ["medicinalproduct", "openfda.route"];
    vec![
        table(
            &columns,
            &[
                ("2020_q1_0001_0", vec![text("ASPIRIN"), CellValue::Missing]),
                ("2020_q1_0001_0", vec![text("IBUPROFEN"), text(r#"["ORAL"]"#)]),
            ],
        ),
        table(&columns, &[]),
        table(
            &columns,
            &[(
                "2020_q1_0001_1",
                vec![text("TYLENOL"), CellValue::Number(serde_json::Number::from(5))],
            )],
        ),
    ]
}

#[test]
fn header_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drugs_2020.csv");
    let tables = drug_tables();

    let summary = write_tables(&path, &tables).expect("write");
    assert_eq!(summary.tables, 3);
    assert_eq!(summary.rows, 3);

    let contents = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(contents, @r#"
    medicinalproduct,openfda.route,patid
    ASPIRIN,,2020_q1_0001_0
    IBUPROFEN,"[""ORAL""]",2020_q1_0001_0
    TYLENOL,5,2020_q1_0001_1
    "#);
}

#[test]
fn header_line_count_invariant() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("other_2020.csv");
    let tables = drug_tables();
    let expected_rows: usize = tables.iter().map(FlatTable::len).sum();

    write_tables(&path, &tables).expect("write");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1 + expected_rows);
    let header_lines = lines.iter().filter(|line| line.starts_with("medicinalproduct")).count();
    assert_eq!(header_lines, 1);
}

#[test]
fn first_append_truncates_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drugs_2020.csv");
    fs::write(&path, "stale,data\n1,2\n").unwrap();

    write_tables(&path, &drug_tables()[2..]).expect("write");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("stale"));
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn drifted_columns_align_by_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drift.csv");
    let first = table(&["a", "b"], &[("p_0", vec![text("1"), text("2")])]);
    let drifted = table(&["b", "c"], &[("p_1", vec![text("3"), text("4")])]);

    write_tables(&path, [&first, &drifted]).expect("write");

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "a,b,patid\n1,2,p_0\n,3,p_1\n");
}

#[test]
fn short_rows_write_empty_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.csv");
    let ragged = FlatTable {
        columns: vec!["a".into(), "b".into(), "patid".into()],
        rows: vec![
            FlatRow {
                patid: PatientId::new("p_0").unwrap(),
                cells: vec![text("1")],
            },
            FlatRow {
                patid: PatientId::new("p_1").unwrap(),
                cells: Vec::new(),
            },
        ],
    };

    let summary = write_tables(&path, [&ragged]).expect("write");

    assert_eq!(summary.rows, 2);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "a,b,patid\n1,,p_0\n,,p_1\n"
    );
}

#[test]
fn declared_header_overrides_first_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("declared.csv");
    let mut writer = IncrementalCsvWriter::with_header(&path, ["b", "a", "patid"]);
    writer
        .append(&table(&["a", "b"], &[("p_0", vec![text("1"), text("2")])]))
        .expect("append");
    let summary = writer.finish().expect("finish");

    assert_eq!(summary.rows, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "b,a,patid\n2,1,p_0\n");
}

#[test]
fn declared_header_without_tables_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    let summary = IncrementalCsvWriter::with_header(&path, ["a", "patid"])
        .finish()
        .expect("finish");

    assert_eq!(summary.tables, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,patid\n");
}

#[test]
fn inferred_header_without_tables_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("never.csv");
    let summary = IncrementalCsvWriter::new(&path).finish().expect("finish");

    assert_eq!(summary.rows, 0);
    assert!(!path.exists());
}
