//! JSON container form reader.

use super::{
    FieldName, ReaderConfig, DATA, EVENT, EVENT_TYPE, PREV_STATE, REASON, SEQUENCE, STATE,
    TIMESTAMP_MS, TIMESTAMP_US,
};
use crate::entry::{LogEntry, MISSING_NUMBER};
use crate::error::{Error, LoadError};
use serde_json::{Map, Value};

/// Parse the JSON container form into canonical entries.
///
/// The top-level object must hold `config.root_key`, whose value is an
/// array of entry objects.
pub fn entries_from_json_str(content: &str, config: &ReaderConfig) -> Result<Vec<LogEntry>, Error> {
    let root: Value = serde_json::from_str(content)?;

    let root = root.as_object().ok_or_else(|| LoadError::NotAnObject {
        found: describe(&root),
    })?;

    let logs = root
        .get(&config.root_key)
        .ok_or_else(|| LoadError::MissingKey(config.root_key.clone()))?;

    let logs = logs.as_array().ok_or_else(|| LoadError::NotAnArray {
        key: config.root_key.clone(),
        found: describe(logs),
    })?;

    logs.iter()
        .enumerate()
        .map(|(index, value)| {
            let record = value.as_object().ok_or_else(|| LoadError::NonObjectEntry {
                index,
                found: describe(value),
            })?;
            entry_from_record(record, index)
        })
        .collect()
}

fn entry_from_record(record: &Map<String, Value>, index: usize) -> Result<LogEntry, Error> {
    Ok(LogEntry {
        sequence: number(record, SEQUENCE, index)?,
        timestamp_ms: number(record, TIMESTAMP_MS, index)?,
        timestamp_us: number(record, TIMESTAMP_US, index)?,
        event_type: text(record, EVENT_TYPE),
        state: text(record, STATE),
        prev_state: text(record, PREV_STATE),
        event: text(record, EVENT),
        reason: text(record, REASON),
        data: text(record, DATA),
    })
}

fn lookup<'a>(record: &'a Map<String, Value>, name: FieldName) -> Option<&'a Value> {
    record
        .get(name.canonical)
        .or_else(|| name.alternate.and_then(|alt| record.get(alt)))
}

fn number(record: &Map<String, Value>, name: FieldName, index: usize) -> Result<i64, LoadError> {
    match lookup(record, name) {
        None => Ok(MISSING_NUMBER),
        Some(value) => value.as_i64().ok_or_else(|| LoadError::InvalidNumber {
            row: index,
            field: name.canonical,
            value: value.to_string(),
        }),
    }
}

fn text(record: &Map<String, Value>, name: FieldName) -> String {
    match lookup(record, name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    kind.to_string()
}
