//! Integration test: JSON result writing.

use std::fs;

use cdi_io::{OutputFormat, WriteOutcome, WriterConfig, write_json};
use serde::Serialize;

#[derive(Serialize)]
struct Row {
    time: &'static str,
    severity: Option<u8>,
}

fn rows() -> Vec<Row> {
    vec![
        Row {
            time: "2020-04-01",
            severity: Some(1),
        },
        Row {
            time: "2020-04-11",
            severity: None,
        },
    ]
}

#[test]
fn writes_compact_json_and_creates_dirs() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("out.json");

    let outcome = write_json(&path, &rows(), &WriterConfig::default()).expect("write succeeds");
    assert_eq!(outcome, WriteOutcome::Written);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"[{"time":"2020-04-01","severity":1},{"time":"2020-04-11","severity":null}]"#
    );
    assert!(!dir.path().join("nested").join("out.json.tmp").exists());
}

#[test]
fn existing_output_is_kept() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("out.json");
    fs::write(&path, "previous").unwrap();

    let outcome = write_json(&path, &rows(), &WriterConfig::default()).expect("write succeeds");
    assert_eq!(outcome, WriteOutcome::AlreadyExists);
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");

    let config = WriterConfig::default()
        .with_overwrite(true)
        .with_format(OutputFormat::JsonPretty);
    assert_eq!(write_json(&path, &rows(), &config).unwrap(), WriteOutcome::Written);
    assert!(fs::read_to_string(&path).unwrap().contains("\n  {"));
}
