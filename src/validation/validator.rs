//! Single-pass consistency checker for workflow traces.
//!
//! Walks the entries once, front to back, keeping its running state in a
//! [`RunningState`] owned by the call. Every finding is collected; nothing
//! aborts the pass.

use super::report::{Anomaly, Stats, ValidationReport, Violation};
use crate::entry::{is_known_state, EventType, LogEntry, MISSING_NUMBER};
use tracing::{debug, info};

/// Validate an ordered trace and report every inconsistency found.
///
/// Checks, per entry:
/// 1. `sequence` strictly increases (error)
/// 2. `timestamp_ms` and `timestamp_us` each never decrease (warning)
/// 3. `event_type`, `state` and non-empty `prev_state` are in the vocabulary (error)
/// 4. STATE_EXIT closes the most recent open STATE_ENTRY of the same state (warning)
///
/// After the last entry, open STATE_ENTRY events and an entry/exit count
/// imbalance are reported as warnings. An empty trace yields a single
/// [`Violation::NoEntries`].
pub fn validate(entries: &[LogEntry]) -> ValidationReport {
    let mut report = ValidationReport::default();

    if entries.is_empty() {
        report.errors.push(Violation::NoEntries);
        info!("Trace has no entries");
        return report;
    }

    info!(entries = entries.len(), "Validating trace");

    let mut state = RunningState::new(&mut report);
    state.stats.total_entries = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        state.check(index, entry);
    }
    state.finish();

    info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        verdict = %report.verdict(),
        "Trace validated"
    );
    report
}

/// Running state of one validation pass.
struct RunningState<'r> {
    prev_sequence: i64,
    prev_timestamp_ms: i64,
    prev_timestamp_us: i64,
    /// Open STATE_ENTRY events as (state, index), innermost last.
    open: Vec<(&'r str, usize)>,
    errors: &'r mut Vec<Violation>,
    warnings: &'r mut Vec<Anomaly>,
    stats: &'r mut Stats,
}

impl<'r> RunningState<'r> {
    fn new(report: &'r mut ValidationReport) -> Self {
        Self {
            prev_sequence: MISSING_NUMBER,
            prev_timestamp_ms: MISSING_NUMBER,
            prev_timestamp_us: MISSING_NUMBER,
            open: Vec::new(),
            errors: &mut report.errors,
            warnings: &mut report.warnings,
            stats: &mut report.stats,
        }
    }

    fn check(&mut self, index: usize, entry: &'r LogEntry) {
        self.check_sequence(index, entry.sequence);
        self.check_timestamps(index, entry.timestamp_ms, entry.timestamp_us);

        let kind = entry.event_kind();
        match kind {
            Some(kind) => self.stats.count(kind),
            None => self.error(Violation::InvalidEventType {
                index,
                value: entry.event_type.clone(),
            }),
        }

        if !is_known_state(&entry.state) {
            self.error(Violation::InvalidState {
                index,
                value: entry.state.clone(),
            });
        }
        if !entry.prev_state.is_empty() && !is_known_state(&entry.prev_state) {
            self.error(Violation::InvalidPrevState {
                index,
                value: entry.prev_state.clone(),
            });
        }

        match kind {
            Some(EventType::StateEntry) => self.open.push((entry.state.as_str(), index)),
            Some(EventType::StateExit) => self.close(index, &entry.state),
            _ => {}
        }
    }

    fn check_sequence(&mut self, index: usize, sequence: i64) {
        if sequence <= self.prev_sequence {
            self.error(Violation::SequenceNotIncreasing {
                index,
                found: sequence,
                previous: self.prev_sequence,
            });
        }
        self.prev_sequence = sequence;
    }

    fn check_timestamps(&mut self, index: usize, ms: i64, us: i64) {
        if ms < self.prev_timestamp_ms {
            self.warn(Anomaly::TimestampMsRegression {
                index,
                found: ms,
                previous: self.prev_timestamp_ms,
            });
        }
        if us < self.prev_timestamp_us {
            self.warn(Anomaly::TimestampUsRegression {
                index,
                found: us,
                previous: self.prev_timestamp_us,
            });
        }
        self.prev_timestamp_ms = ms;
        self.prev_timestamp_us = us;
    }

    /// Pair a STATE_EXIT with the most recent open entry.
    ///
    /// An exit with nothing open is accepted silently; it only shows up in
    /// the entry/exit count check at the end.
    fn close(&mut self, index: usize, state: &str) {
        let Some((open_state, open_index)) = self.open.pop() else {
            return;
        };
        if open_state != state {
            self.warn(Anomaly::MismatchedExit {
                index,
                state: state.to_string(),
                open_state: open_state.to_string(),
                open_index,
            });
        }
    }

    fn finish(mut self) {
        for (state, index) in std::mem::take(&mut self.open) {
            self.warn(Anomaly::UnmatchedEntry {
                index,
                state: state.to_string(),
            });
        }

        if self.stats.state_entries != self.stats.state_exits {
            self.warn(Anomaly::UnbalancedPairs {
                entries: self.stats.state_entries,
                exits: self.stats.state_exits,
            });
        }
    }

    fn error(&mut self, violation: Violation) {
        debug!(%violation, "Validation error");
        self.errors.push(violation);
    }

    fn warn(&mut self, anomaly: Anomaly) {
        debug!(%anomaly, "Validation warning");
        self.warnings.push(anomaly);
    }
}
