//! Entry normalizer: turns an exported log file into canonical
//! [`LogEntry`] values.
//!
//! Two encodings are supported:
//!
//! - **JSON container form**: `{"workflow_logs": [ {..}, {..} ]}`, with each
//!   field accepted under its snake_case or camelCase name.
//! - **CSV tabular form**: a header row naming the nine canonical columns,
//!   then one row per entry.
//!
//! Absent fields become sentinels ([`MISSING_NUMBER`](crate::MISSING_NUMBER)
//! or the empty string) so the validator reports them. Structural problems
//! are returned as [`LoadError`] and stop the run before validation.
//!
//! # Example
//!
//! ```no_run
//! use wflog_validate::{load_entries, ReaderConfig};
//! use std::path::Path;
//!
//! let config = ReaderConfig::default();
//! let entries = load_entries(Path::new("workflow_logs.json"), &config)?;
//! println!("{} entries", entries.len());
//! # Ok::<(), wflog_validate::Error>(())
//! ```

pub mod csv;
pub mod json;

use crate::builder::impl_builder;
use crate::entry::LogEntry;
use crate::error::{BuilderError, Error, LoadError};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

pub use self::csv::entries_from_csv_str;
pub use self::json::entries_from_json_str;

/// Source encoding of an exported log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LogFormat {
    /// Container object holding an array of entry objects.
    Json,
    /// Header row plus one row per entry.
    Csv,
}

impl LogFormat {
    /// Select the encoding from the file extension (`.json` or `.csv`).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(LogFormat::Json),
            Some("csv") => Ok(LogFormat::Csv),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => f.write_str("JSON"),
            LogFormat::Csv => f.write_str("CSV"),
        }
    }
}

/// Options for reading exported logs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ReaderConfig {
    /// Key of the entry array in the JSON container (default: "workflow_logs").
    pub root_key: String,

    /// Field separator for the CSV form (default: ',').
    pub delimiter: char,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            root_key: DEFAULT_ROOT_KEY.into(),
            delimiter: ',',
        }
    }
}

impl_builder!(ReaderConfig, ReaderConfigBuilder {
    root_key: String,
    delimiter: char,
} check check_reader_config);

fn check_reader_config(config: &ReaderConfig) -> Result<(), BuilderError> {
    if config.root_key.is_empty() {
        return Err(BuilderError::InvalidField {
            builder: "ReaderConfigBuilder",
            field: "root_key",
            reason: "must not be empty".into(),
        });
    }
    if matches!(config.delimiter, '"' | '\n' | '\r') {
        return Err(BuilderError::InvalidField {
            builder: "ReaderConfigBuilder",
            field: "delimiter",
            reason: format!("{:?} cannot separate CSV fields", config.delimiter),
        });
    }
    Ok(())
}

/// Container key used by the workflow engine's JSON export.
pub const DEFAULT_ROOT_KEY: &str = "workflow_logs";

/// Read a log file and normalize it, choosing the encoding by extension.
pub fn load_entries(path: &Path, config: &ReaderConfig) -> Result<Vec<LogEntry>, Error> {
    let format = LogFormat::from_path(path)?;
    load_entries_as(path, format, config)
}

/// Read a log file in an explicitly chosen encoding.
pub fn load_entries_as(
    path: &Path,
    format: LogFormat,
    config: &ReaderConfig,
) -> Result<Vec<LogEntry>, Error> {
    info!(path = %path.display(), %format, "Reading log file");

    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let entries = match format {
        LogFormat::Json => entries_from_json_str(&content, config)?,
        LogFormat::Csv => entries_from_csv_str(&content, config)?,
    };

    debug!(entries = entries.len(), "Normalized log entries");
    Ok(entries)
}

/// Canonical and alternate spelling of one source field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldName {
    pub canonical: &'static str,
    pub alternate: Option<&'static str>,
}

impl FieldName {
    const fn new(canonical: &'static str, alternate: &'static str) -> Self {
        Self {
            canonical,
            alternate: Some(alternate),
        }
    }

    const fn only(canonical: &'static str) -> Self {
        Self {
            canonical,
            alternate: None,
        }
    }
}

pub(crate) const SEQUENCE: FieldName = FieldName::new("seq", "sequenceNumber");
pub(crate) const TIMESTAMP_MS: FieldName = FieldName::new("timestamp_ms", "timestampMs");
pub(crate) const TIMESTAMP_US: FieldName = FieldName::new("timestamp_us", "timestampUs");
pub(crate) const EVENT_TYPE: FieldName = FieldName::new("event_type", "eventType");
pub(crate) const STATE: FieldName = FieldName::only("state");
pub(crate) const PREV_STATE: FieldName = FieldName::new("prev_state", "prevState");
pub(crate) const EVENT: FieldName = FieldName::only("event");
pub(crate) const REASON: FieldName = FieldName::only("reason");
pub(crate) const DATA: FieldName = FieldName::only("data");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(LogFormat::from_path(Path::new("a/b.json")).unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_path(Path::new("b.csv")).unwrap(), LogFormat::Csv);
    }

    #[test]
    fn format_rejects_unknown_extension() {
        let err = LogFormat::from_path(Path::new("trace.ndjson")).unwrap_err();
        assert!(err.to_string().contains("Use .json or .csv"));
        assert!(LogFormat::from_path(Path::new("trace")).is_err());
        assert!(LogFormat::from_path(Path::new("TRACE.JSON")).is_err());
    }

    #[test]
    fn builder_fills_defaults() {
        let config = ReaderConfig::builder().delimiter(';').build().unwrap();
        assert_eq!(config.root_key, "workflow_logs");
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn builder_rejects_quote_delimiter() {
        let err = ReaderConfig::builder().delimiter('"').build().unwrap_err();
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn builder_rejects_empty_root_key() {
        let err = ReaderConfig::builder().root_key("").build().unwrap_err();
        assert!(err.to_string().contains("root_key"));
    }
}
