//! Deterministic trace recorder: the producing side of the log format.
//!
//! Records workflow events with consecutive sequence numbers into a bounded
//! FIFO buffer and exports them in the JSON container form or the CSV
//! tabular form. Time is supplied by the caller through
//! [`TraceRecorder::set_time`], so recordings are reproducible.
//!
//! ```
//! use wflog_validate::{validate, TraceRecorder, WorkflowState};
//!
//! let mut rec = TraceRecorder::new();
//! rec.enter_state(WorkflowState::Idle, "boot");
//! rec.set_time(12, 12_400);
//! rec.transition_to(WorkflowState::Init, "start");
//! rec.exit_state(WorkflowState::Init, "done");
//!
//! let report = validate(&rec.entries());
//! assert!(report.is_success());
//! ```

use crate::builder::impl_builder;
use crate::entry::{EventType, LogEntry, WorkflowState};
use crate::error::{BuilderError, Error};
use crate::normalize::csv::{escape_field, COLUMNS};
use crate::normalize::DEFAULT_ROOT_KEY;
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Options for a [`TraceRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RecorderConfig {
    /// Maximum retained entries; the oldest is dropped first (default: 1000).
    pub capacity: usize,

    /// Key of the entry array in JSON exports (default: "workflow_logs").
    pub root_key: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            root_key: DEFAULT_ROOT_KEY.into(),
        }
    }
}

impl_builder!(RecorderConfig, RecorderConfigBuilder {
    capacity: usize,
    root_key: String,
} check check_recorder_config);

fn check_recorder_config(config: &RecorderConfig) -> Result<(), BuilderError> {
    if config.capacity == 0 {
        return Err(BuilderError::InvalidField {
            builder: "RecorderConfigBuilder",
            field: "capacity",
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

/// Records workflow events in the canonical log shape.
#[derive(Debug)]
pub struct TraceRecorder {
    config: RecorderConfig,
    entries: VecDeque<LogEntry>,
    next_sequence: i64,
    timestamp_ms: i64,
    timestamp_us: i64,
    current_state: WorkflowState,
    previous_state: WorkflowState,
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceRecorder {
    /// Create a recorder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RecorderConfig::default())
    }

    pub fn with_config(config: RecorderConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity.min(1024)),
            config,
            next_sequence: 0,
            timestamp_ms: 0,
            timestamp_us: 0,
            current_state: WorkflowState::Idle,
            previous_state: WorkflowState::Idle,
        }
    }

    /// Set the clock stamped onto subsequent entries.
    pub fn set_time(&mut self, timestamp_ms: i64, timestamp_us: i64) -> &mut Self {
        self.timestamp_ms = timestamp_ms;
        self.timestamp_us = timestamp_us;
        self
    }

    pub fn current_state(&self) -> WorkflowState {
        self.current_state
    }

    pub fn previous_state(&self) -> WorkflowState {
        self.previous_state
    }

    /// Append one event, stamped with the next sequence number, the current
    /// time and the current/previous state.
    pub fn record(
        &mut self,
        event_type: EventType,
        event: impl Into<String>,
        reason: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        if self.entries.len() >= self.config.capacity {
            self.entries.pop_front();
        }

        let entry = LogEntry {
            sequence: self.next_sequence,
            timestamp_ms: self.timestamp_ms,
            timestamp_us: self.timestamp_us,
            event_type: event_type.to_string(),
            state: self.current_state.to_string(),
            prev_state: self.previous_state.to_string(),
            event: event.into(),
            reason: reason.into(),
            data: data.into(),
        };
        debug!(
            seq = entry.sequence,
            event_type = %entry.event_type,
            state = %entry.state,
            event = %entry.event,
            "Recorded event"
        );

        self.next_sequence += 1;
        self.entries.push_back(entry);
        self
    }

    /// Record `STATE_ENTRY` for `state` (event `ENTER_<STATE>`).
    pub fn enter_state(&mut self, state: WorkflowState, reason: &str) -> &mut Self {
        self.record(EventType::StateEntry, format!("ENTER_{state}"), reason, "")
    }

    /// Record `STATE_EXIT` for `state` (event `EXIT_<STATE>`).
    pub fn exit_state(&mut self, state: WorkflowState, reason: &str) -> &mut Self {
        self.record(EventType::StateExit, format!("EXIT_{state}"), reason, "")
    }

    /// Move the workflow to `next`: exit the current state, log the
    /// transition, then enter `next`.
    pub fn transition_to(&mut self, next: WorkflowState, reason: &str) -> &mut Self {
        let from = self.current_state;
        self.exit_state(from, reason);
        self.record(
            EventType::Transition,
            "TRANSITION",
            reason,
            format!("from={from} to={next}"),
        );
        self.previous_state = from;
        self.current_state = next;
        self.enter_state(next, reason)
    }

    pub fn user_action(&mut self, event: &str, reason: &str) -> &mut Self {
        self.record(EventType::UserAction, event, reason, "")
    }

    pub fn error(&mut self, message: &str, data: &str) -> &mut Self {
        self.record(EventType::Error, "ERROR", message, data)
    }

    pub fn timeout(&mut self, data: &str) -> &mut Self {
        self.record(EventType::Timeout, "TIMEOUT", "State timeout exceeded", data)
    }

    /// Drop all entries and restart sequence numbering at 0.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_sequence = 0;
        info!("Recorder cleared");
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the retained entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Export in the JSON container form.
    pub fn to_json_string(&self) -> Result<String, Error> {
        let mut root = serde_json::Map::new();
        root.insert(
            self.config.root_key.clone(),
            serde_json::to_value(&self.entries)?,
        );
        Ok(serde_json::to_string_pretty(&serde_json::Value::Object(root))?)
    }

    /// Export in the CSV tabular form with a header row.
    pub fn to_csv_string(&self) -> String {
        let mut out = COLUMNS.join(",");
        out.push('\n');
        for e in &self.entries {
            let cells = [
                e.sequence.to_string(),
                e.timestamp_ms.to_string(),
                e.timestamp_us.to_string(),
                escape_field(&e.event_type, ','),
                escape_field(&e.state, ','),
                escape_field(&e.prev_state, ','),
                escape_field(&e.event, ','),
                escape_field(&e.reason, ','),
                escape_field(&e.data, ','),
            ];
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }

    /// Write the JSON export to `path`. Returns the number of entries written.
    pub fn write_json(&self, path: &Path) -> Result<usize, Error> {
        self.write_to(path, self.to_json_string()?.as_bytes())
    }

    /// Write the CSV export to `path`. Returns the number of entries written.
    pub fn write_csv(&self, path: &Path) -> Result<usize, Error> {
        self.write_to(path, self.to_csv_string().as_bytes())
    }

    fn write_to(&self, path: &Path, bytes: &[u8]) -> Result<usize, Error> {
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        writer.write_all(bytes)?;
        writer.flush()?;
        info!(path = %path.display(), entries = self.entries.len(), "Exported trace");
        Ok(self.entries.len())
    }
}
