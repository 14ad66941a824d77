//! Trace validation: check an ordered workflow trace for sequencing,
//! vocabulary and entry/exit pairing problems.
//!
//! Findings come in two severities:
//! - [`Violation`] (error): bad ordering, unknown event type or state. Any
//!   violation fails the run.
//! - [`Anomaly`] (warning): timestamp regression, mismatched or unclosed
//!   state-entry, entry/exit count imbalance.
//!
//! Problems that prevent a trace from being read at all are returned as
//! [`Error`](crate::Error) before validation starts.
//!
//! # Example
//!
//! ```no_run
//! use wflog_validate::{render_text, validate_file, ReaderConfig};
//! use std::path::Path;
//!
//! let report = validate_file(Path::new("workflow_logs.csv"), &ReaderConfig::default())?;
//! print!("{}", render_text(&report));
//! std::process::exit(if report.is_success() { 0 } else { 1 });
//! # Ok::<(), wflog_validate::Error>(())
//! ```

pub mod render;
pub mod report;
pub mod validator;

pub use render::{exit_code, render_json, render_text};
pub use report::{Anomaly, Stats, ValidationReport, Verdict, Violation};
pub use validator::validate;

use crate::error::Error;
use crate::normalize::{load_entries, ReaderConfig};
use std::path::Path;

/// Load a log file and validate it.
///
/// Read and structure failures are returned as `Err` and no validation is
/// attempted; everything else ends up in the report.
#[must_use = "validation result should be checked"]
pub fn validate_file(path: &Path, config: &ReaderConfig) -> Result<ValidationReport, Error> {
    let entries = load_entries(path, config)?;
    Ok(validate(&entries))
}

/// Validate independent trace files in parallel.
///
/// Results are returned in the order of `paths`.
#[cfg(feature = "parallel")]
pub fn validate_files<P>(
    paths: &[P],
    config: &ReaderConfig,
) -> Vec<(std::path::PathBuf, Result<ValidationReport, Error>)>
where
    P: AsRef<Path> + Sync,
{
    use rayon::prelude::*;

    tracing::info!(files = paths.len(), "Validating traces in parallel");

    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            (path.to_path_buf(), validate_file(path, config))
        })
        .collect()
}
