//! wflog-validate: post-hoc consistency checks for deterministic workflow logs.
//!
//! A workflow engine exports a trace of its execution: every state entry and
//! exit, every transition, user action, timeout and error, each stamped with
//! a sequence number and two timestamps. This crate checks that such a trace
//! could have come from a well-behaved run:
//!
//! - sequence numbers strictly increase;
//! - millisecond and microsecond timestamps never go backwards;
//! - event types and states belong to the workflow's vocabulary;
//! - state entries and exits nest like balanced brackets.
//!
//! It never executes or simulates the workflow.
//!
//! The pieces:
//!
//! 1. [`normalize`] reads the JSON container form or the CSV tabular form
//!    into canonical [`LogEntry`] values.
//! 2. [`validate`] walks the entries once and returns a [`ValidationReport`]
//!    with errors, warnings and per-type counters.
//! 3. [`render_text`] / [`render_json`] format the report.
//! 4. [`TraceRecorder`] produces traces in the same format, for fixtures and
//!    for Rust code that emits workflow logs.
//!
//! # Quick Start
//!
//! ```no_run
//! use wflog_validate::{render_text, validate_file, ReaderConfig};
//! use std::path::Path;
//!
//! let config = ReaderConfig::builder().root_key("workflow_logs").build()?;
//! let report = validate_file(Path::new("export.json"), &config)?;
//! println!("{}", render_text(&report));
//! assert!(report.is_success());
//! # Ok::<(), wflog_validate::Error>(())
//! ```

mod builder;
pub mod entry;
pub mod error;
pub mod normalize;
pub mod recorder;
pub mod validation;

// Re-export core types for convenience
pub use entry::{EventType, LogEntry, UnknownName, WorkflowState, MISSING_NUMBER};
pub use error::{BuilderError, Error, LoadError, WflogResult};
pub use normalize::{
    entries_from_csv_str, entries_from_json_str, load_entries, load_entries_as, LogFormat,
    ReaderConfig, ReaderConfigBuilder,
};
pub use recorder::{RecorderConfig, RecorderConfigBuilder, TraceRecorder};
pub use validation::{
    exit_code, render_json, render_text, validate, validate_file, Anomaly, Stats,
    ValidationReport, Verdict, Violation,
};

#[cfg(feature = "parallel")]
pub use validation::validate_files;
