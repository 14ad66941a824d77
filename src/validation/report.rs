//! Validation outcome: findings split by severity, plus event counters.

use crate::entry::EventType;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// An entry-level violation that makes the trace untrustworthy.
///
/// Any violation fails the validation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Violation {
    /// The trace contained no entries at all.
    #[error("No log entries found")]
    NoEntries,

    /// Sequence number did not strictly increase.
    #[error("Entry {index}: Sequence number {found} not increasing (prev: {previous})")]
    SequenceNotIncreasing {
        index: usize,
        found: i64,
        previous: i64,
    },

    /// Event type outside the vocabulary.
    #[error("Entry {index}: Invalid event type: {value}")]
    InvalidEventType { index: usize, value: String },

    /// State outside the vocabulary.
    #[error("Entry {index}: Invalid state: {value}")]
    InvalidState { index: usize, value: String },

    /// Non-empty previous state outside the vocabulary.
    #[error("Entry {index}: Invalid prev_state: {value}")]
    InvalidPrevState { index: usize, value: String },
}

impl Violation {
    /// Zero-based index of the offending entry, if the violation has one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Violation::NoEntries => None,
            Violation::SequenceNotIncreasing { index, .. }
            | Violation::InvalidEventType { index, .. }
            | Violation::InvalidState { index, .. }
            | Violation::InvalidPrevState { index, .. } => Some(*index),
        }
    }
}

/// A soft anomaly, reported to the operator without failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Anomaly {
    /// Millisecond timestamp went backwards.
    #[error("Entry {index}: Timestamp MS {found} < previous {previous}")]
    TimestampMsRegression {
        index: usize,
        found: i64,
        previous: i64,
    },

    /// Microsecond timestamp went backwards.
    #[error("Entry {index}: Timestamp US {found} < previous {previous}")]
    TimestampUsRegression {
        index: usize,
        found: i64,
        previous: i64,
    },

    /// A STATE_EXIT closed the most recent open entry of a different state.
    #[error("Entry {index}: EXIT_{state} doesn't match ENTRY_{open_state} at {open_index}")]
    MismatchedExit {
        index: usize,
        state: String,
        open_state: String,
        open_index: usize,
    },

    /// A STATE_ENTRY was still open when the trace ended.
    #[error("Entry {index}: ENTER_{state} has no matching EXIT")]
    UnmatchedEntry { index: usize, state: String },

    /// Total STATE_ENTRY and STATE_EXIT counts differ.
    #[error("Unbalanced state entries/exits: {entries} entries, {exits} exits")]
    UnbalancedPairs { entries: usize, exits: usize },
}

impl Anomaly {
    /// Zero-based index of the offending entry, if the anomaly has one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Anomaly::UnbalancedPairs { .. } => None,
            Anomaly::TimestampMsRegression { index, .. }
            | Anomaly::TimestampUsRegression { index, .. }
            | Anomaly::MismatchedExit { index, .. }
            | Anomaly::UnmatchedEntry { index, .. } => Some(*index),
        }
    }
}

/// Per-run counters. Every field is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_entries: usize,
    pub state_entries: usize,
    pub state_exits: usize,
    pub transitions: usize,
    pub user_actions: usize,
    pub timeouts: usize,
    /// Entries of type `ERROR` (logged workflow errors, not validation errors).
    pub errors: usize,
}

impl Stats {
    pub(crate) fn count(&mut self, event_type: EventType) {
        let counter = match event_type {
            EventType::StateEntry => &mut self.state_entries,
            EventType::StateExit => &mut self.state_exits,
            EventType::Transition => &mut self.transitions,
            EventType::Error => &mut self.errors,
            EventType::UserAction => &mut self.user_actions,
            EventType::Timeout => &mut self.timeouts,
        };
        *counter += 1;
    }

    /// Counter for a single event type.
    pub fn of(&self, event_type: EventType) -> usize {
        match event_type {
            EventType::StateEntry => self.state_entries,
            EventType::StateExit => self.state_exits,
            EventType::Transition => self.transitions,
            EventType::Error => self.errors,
            EventType::UserAction => self.user_actions,
            EventType::Timeout => self.timeouts,
        }
    }
}

/// Overall outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Passed => "PASSED",
            Verdict::PassedWithWarnings => "PASSED WITH WARNINGS",
            Verdict::Failed => "FAILED",
        })
    }
}

/// Result of validating one trace.
///
/// Built by [`validate`](crate::validate) in a single pass and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "validation report should be checked"]
pub struct ValidationReport {
    pub(crate) errors: Vec<Violation>,
    pub(crate) warnings: Vec<Anomaly>,
    pub(crate) stats: Stats,
}

impl ValidationReport {
    /// Errors in the order they were found.
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Warnings in the order they were found.
    pub fn warnings(&self) -> &[Anomaly] {
        &self.warnings
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// True when no errors were found. Warnings do not count.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        if !self.errors.is_empty() {
            Verdict::Failed
        } else if !self.warnings.is_empty() {
            Verdict::PassedWithWarnings
        } else {
            Verdict::Passed
        }
    }
}

/// Serialized shape of one finding: `{"index": 3, "message": "..."}`.
struct Finding<'a, T> {
    index: Option<usize>,
    item: &'a T,
}

impl<T: fmt::Display> Serialize for Finding<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Finding", 2)?;
        s.serialize_field("index", &self.index)?;
        s.serialize_field("message", &self.item.to_string())?;
        s.end()
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let errors: Vec<_> = self
            .errors
            .iter()
            .map(|item| Finding { index: item.index(), item })
            .collect();
        let warnings: Vec<_> = self
            .warnings
            .iter()
            .map(|item| Finding { index: item.index(), item })
            .collect();

        let mut s = serializer.serialize_struct("ValidationReport", 5)?;
        s.serialize_field("success", &self.is_success())?;
        s.serialize_field("verdict", &self.verdict())?;
        s.serialize_field("stats", &self.stats)?;
        s.serialize_field("errors", &errors)?;
        s.serialize_field("warnings", &warnings)?;
        s.end()
    }
}
