//! Tests for reading exported logs from disk.

use std::io::Write;
use wflog_validate::*;

const CSV_HEADER: &str =
    "sequence,timestamp_ms,timestamp_us,event_type,state,prev_state,event,reason,data";

fn write_file(dir: &tempfile::TempDir, filename: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(filename);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

#[test]
fn test_json_and_csv_normalize_identically() {
    let dir = tempfile::tempdir().unwrap();
    let json = write_file(
        &dir,
        "trace.json",
        r#"{
          "workflow_logs": [
            {"seq": 0, "timestamp_ms": 100, "timestamp_us": 100000, "event_type": "STATE_ENTRY",
             "state": "IDLE", "prev_state": "IDLE", "event": "ENTER_IDLE", "reason": "boot", "data": ""},
            {"sequenceNumber": 1, "timestampMs": 150, "timestampUs": 150020, "eventType": "TRANSITION",
             "state": "IDLE", "prevState": "IDLE", "event": "TRANSITION", "reason": "start",
             "data": "from=IDLE to=INIT"}
          ]
        }"#,
    );
    let csv = write_file(
        &dir,
        "trace.csv",
        &format!(
            "{CSV_HEADER}\n\
             0,100,100000,STATE_ENTRY,IDLE,IDLE,ENTER_IDLE,boot,\n\
             1,150,150020,TRANSITION,IDLE,IDLE,TRANSITION,start,from=IDLE to=INIT\n"
        ),
    );

    let config = ReaderConfig::default();
    let from_json = load_entries(&json, &config).unwrap();
    let from_csv = load_entries(&csv, &config).unwrap();

    assert_eq!(from_json.len(), 2);
    assert_eq!(from_json, from_csv);
}

#[test]
fn test_unknown_extension_rejected_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.txt");

    let err = load_entries(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Load(LoadError::UnsupportedFormat(_))));
}

#[test]
fn test_missing_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_entries(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Load(LoadError::Unreadable { .. })));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "trace.log", &format!("{CSV_HEADER}\n0,1,1,ERROR,READY,,ERROR,x,\n"));

    let entries = load_entries_as(&path, LogFormat::Csv, &ReaderConfig::default()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, "ERROR");
}

#[test]
fn test_validate_file_hard_failures_skip_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReaderConfig::default();

    let missing_key = write_file(&dir, "a.json", r#"{"other": []}"#);
    let err = validate_file(&missing_key, &config).unwrap_err();
    assert!(err.to_string().contains("Missing 'workflow_logs' key in JSON"));

    let bad_json = write_file(&dir, "b.json", "{not json");
    assert!(matches!(validate_file(&bad_json, &config).unwrap_err(), Error::Json(_)));

    let bad_number = write_file(&dir, "c.csv", &format!("{CSV_HEADER}\nseven,1,1,ERROR,READY,,e,r,d\n"));
    let err = validate_file(&bad_number, &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Load(LoadError::InvalidNumber { row: 0, field: "sequence", .. })
    ));
}

#[test]
fn test_validate_file_empty_container_is_soft_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "empty.json", r#"{"workflow_logs": []}"#);

    let report = validate_file(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(report.errors(), &[Violation::NoEntries]);
}

#[test]
fn test_missing_fields_surface_as_findings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "sparse.json",
        r#"{"workflow_logs": [{"event_type": "TRANSITION", "state": "IDLE"}]}"#,
    );

    let report = validate_file(&path, &ReaderConfig::default()).unwrap();
    // seq falls back to -1, which does not exceed the initial -1.
    assert_eq!(
        report.errors(),
        &[Violation::SequenceNotIncreasing { index: 0, found: -1, previous: -1 }]
    );
    assert!(report.warnings().is_empty());
}

#[test]
fn test_header_only_csv_reports_no_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "header.csv", &format!("{CSV_HEADER}\n"));

    let report = validate_file(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(report.errors(), &[Violation::NoEntries]);
    assert_eq!(report.stats().total_entries, 0);
}

#[cfg(feature = "parallel")]
#[test]
fn test_validate_files_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(&dir, "good.csv", &format!("{CSV_HEADER}\n0,1,1,ERROR,READY,,e,r,d\n"));
    let empty = write_file(&dir, "empty.json", r#"{"workflow_logs": []}"#);
    let broken = write_file(&dir, "broken.json", "[");

    let results = validate_files(&[&good, &empty, &broken], &ReaderConfig::default());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, good);
    assert!(results[0].1.as_ref().unwrap().is_success());
    assert!(!results[1].1.as_ref().unwrap().is_success());
    assert!(results[2].1.is_err());
}
