//! CSV tabular form reader.
//!
//! Quoting follows RFC 4180: a field wrapped in double quotes may contain the
//! delimiter, line breaks and doubled quotes (`""`).

use super::ReaderConfig;
use crate::entry::LogEntry;
use crate::error::{Error, LoadError};

/// Literal header names of the tabular form, in export order.
pub const COLUMNS: [&str; 9] = [
    "sequence",
    "timestamp_ms",
    "timestamp_us",
    "event_type",
    "state",
    "prev_state",
    "event",
    "reason",
    "data",
];

/// Parse the CSV tabular form into canonical entries.
///
/// Every column in [`COLUMNS`] must appear in the header; order is free and
/// extra columns are ignored. A numeric cell that does not parse as an
/// integer fails the whole document.
pub fn entries_from_csv_str(content: &str, config: &ReaderConfig) -> Result<Vec<LogEntry>, Error> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = parse_records(content, config.delimiter)?.into_iter();

    let header = records.next().ok_or(LoadError::MissingHeader)?;
    let mut positions = [0usize; COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(COLUMNS) {
        *slot = header
            .iter()
            .position(|name| name == column)
            .ok_or(LoadError::MissingColumn(column))?;
    }

    let mut entries = Vec::new();
    for (row, record) in records.enumerate() {
        let cell = |column: usize| record.get(positions[column]).map(String::as_str);
        let number = |column: usize| -> Result<i64, LoadError> {
            let raw = cell(column).unwrap_or("");
            raw.trim().parse().map_err(|_| LoadError::InvalidNumber {
                row,
                field: COLUMNS[column],
                value: raw.to_string(),
            })
        };
        let text = |column: usize| cell(column).unwrap_or("").to_string();

        entries.push(LogEntry {
            sequence: number(0)?,
            timestamp_ms: number(1)?,
            timestamp_us: number(2)?,
            event_type: text(3),
            state: text(4),
            prev_state: text(5),
            event: text(6),
            reason: text(7),
            data: text(8),
        });
    }

    Ok(entries)
}

/// Split a document into records of raw field values, skipping blank lines.
fn parse_records(content: &str, delimiter: char) -> Result<Vec<Vec<String>>, LoadError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted_record = false;
    let mut line = 1;
    let mut quote_line = 1;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quoted_record = true;
                quote_line = line;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                finish_record(&mut records, std::mem::take(&mut fields), quoted_record);
                quoted_record = false;
                line += 1;
            }
            c if c == delimiter => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LoadError::UnterminatedQuote { line: quote_line });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        finish_record(&mut records, fields, quoted_record);
    }

    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, fields: Vec<String>, quoted: bool) {
    let blank = !quoted && fields.len() == 1 && fields[0].is_empty();
    if !blank {
        records.push(fields);
    }
}

/// Quote a field for the tabular form when it needs it.
pub(crate) fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains(['"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
