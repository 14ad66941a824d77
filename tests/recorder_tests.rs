//! Tests for recording traces and validating what was recorded.

use wflog_validate::*;

/// Advance the recorder's clock by `ms` milliseconds.
fn advance(rec: &mut TraceRecorder, clock: &mut i64, ms: i64) {
    *clock += ms;
    rec.set_time(*clock, *clock * 1000 + 7);
}

/// A full listen/analyze/transmit cycle, as the workflow engine logs it.
fn record_cycle(rec: &mut TraceRecorder) {
    let mut clock = 0i64;

    rec.enter_state(WorkflowState::Idle, "boot");
    advance(rec, &mut clock, 5);
    rec.transition_to(WorkflowState::Init, "start");
    advance(rec, &mut clock, 20);
    rec.transition_to(WorkflowState::Listening, "initialized");
    advance(rec, &mut clock, 3000);
    rec.user_action("TRIGGER_ANALYSIS", "manual trigger");
    rec.transition_to(WorkflowState::Analyzing, "trigger");
    advance(rec, &mut clock, 150);
    rec.transition_to(WorkflowState::Ready, "analysis complete");
    rec.user_action("SELECT_SIGNAL", "index=0");
    rec.transition_to(WorkflowState::TxGated, "signal selected");
    advance(rec, &mut clock, 10_000);
    rec.timeout("state=TX_GATED elapsed=10000");
    rec.transition_to(WorkflowState::Cleanup, "gate timeout");
    advance(rec, &mut clock, 2);
    rec.transition_to(WorkflowState::Idle, "cleanup done");
    rec.exit_state(WorkflowState::Idle, "shutdown");
}

#[test]
fn test_recorded_cycle_passes() {
    let mut rec = TraceRecorder::new();
    record_cycle(&mut rec);

    let report = validate(&rec.entries());
    assert_eq!(report.verdict(), Verdict::Passed, "{}", render_text(&report));
    assert_eq!(report.stats().transitions, 7);
    assert_eq!(report.stats().state_entries, report.stats().state_exits);
    assert_eq!(report.stats().user_actions, 2);
    assert_eq!(report.stats().timeouts, 1);
}

#[test]
fn test_firmware_style_start_without_initial_entry() {
    // The engine exits IDLE without ever having logged entering it.
    let mut rec = TraceRecorder::new();
    rec.transition_to(WorkflowState::Init, "start");
    rec.exit_state(WorkflowState::Init, "abort");

    let report = validate(&rec.entries());
    assert!(report.is_success());
    assert_eq!(
        report.warnings(),
        &[Anomaly::UnbalancedPairs { entries: 1, exits: 2 }]
    );
}

#[test]
fn test_exports_load_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let mut rec = TraceRecorder::new();
    record_cycle(&mut rec);
    rec.error("RF module, not ready", "code=\"E42\"");

    let json_path = dir.path().join("export.json");
    let csv_path = dir.path().join("export.csv");
    assert_eq!(rec.write_json(&json_path).unwrap(), rec.len());
    assert_eq!(rec.write_csv(&csv_path).unwrap(), rec.len());

    let config = ReaderConfig::default();
    let from_json = load_entries(&json_path, &config).unwrap();
    let from_csv = load_entries(&csv_path, &config).unwrap();

    assert_eq!(from_json, rec.entries());
    assert_eq!(from_csv, rec.entries());
}

#[test]
fn test_custom_root_key_export() {
    let config = RecorderConfig::builder().root_key("trace").build().unwrap();
    let mut rec = TraceRecorder::with_config(config);
    rec.enter_state(WorkflowState::Idle, "boot");

    let json = rec.to_json_string().unwrap();
    let reader = ReaderConfig::builder().root_key("trace").build().unwrap();
    assert_eq!(entries_from_json_str(&json, &reader).unwrap().len(), 1);
    assert!(entries_from_json_str(&json, &ReaderConfig::default()).is_err());
}

#[test]
fn test_eviction_keeps_trace_valid_ordering() {
    let config = RecorderConfig::builder().capacity(4usize).build().unwrap();
    let mut rec = TraceRecorder::with_config(config);
    for i in 0..10 {
        rec.set_time(i, i * 1000);
        rec.user_action("TICK", "");
    }

    let entries = rec.entries();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].sequence, 6);

    let report = validate(&entries);
    assert_eq!(report.verdict(), Verdict::Passed);
}
