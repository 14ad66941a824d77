//! Typed errors for wflog-validate.
//!
//! Only structural problems that stop a trace from being read at all are
//! errors here. Per-entry findings are collected into a
//! [`ValidationReport`](crate::ValidationReport) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for wflog-validate operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The log could not be turned into an entry sequence.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// A configuration builder rejected one of its fields.
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hard failure while reading a log, reported before validation runs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// Log file could not be read.
    #[error("Error reading file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// File extension does not select a known encoding.
    #[error("Unknown file format: {0}. Use .json or .csv")]
    UnsupportedFormat(PathBuf),

    /// Top-level JSON value is not an object.
    #[error("Expected a JSON object at the top level, got: {found}")]
    NotAnObject { found: String },

    /// Container key is absent from the top-level object.
    #[error("Missing '{0}' key in JSON")]
    MissingKey(String),

    /// Container key does not hold an array.
    #[error("Expected '{key}' to be an array, got: {found}")]
    NotAnArray { key: String, found: String },

    /// An element of the entry array is not an object.
    #[error("Log entry {index} is not a JSON object: {found}")]
    NonObjectEntry { index: usize, found: String },

    /// CSV document has no header row.
    #[error("CSV header row is missing")]
    MissingHeader,

    /// CSV header lacks a required column.
    #[error("CSV header is missing column '{0}'")]
    MissingColumn(&'static str),

    /// CSV quoted field was never closed.
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    /// Numeric field could not be read as an integer.
    #[error("Entry {row}: field '{field}' is not an integer: {value:?}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Error building a configuration value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuilderError {
    /// A builder field was set to a value the consumer cannot use.
    #[error("{builder}: invalid value for '{field}': {reason}")]
    InvalidField {
        builder: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Result type alias using wflog-validate's Error.
pub type WflogResult<T> = std::result::Result<T, Error>;
