//! CSV serialization
//!
//! The header row comes from the first record's field names, in declaration
//! order (serde_json's preserve-order map keeps the serialized key order);
//! every record is rendered in that field order. Missing fields render empty,
//! null renders empty, everything else renders through its JSON display form
//! minus the string quotes.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// One exported or imported record as ordered field/value text pairs.
pub type Row = Vec<(String, String)>;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("record did not serialize to an object")]
    NotAnObject,
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Flatten serializable records into field/value rows, preserving field
/// order from the first record.
pub fn to_rows<T: Serialize>(records: &[T]) -> Result<Vec<Row>, CsvError> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let value = serde_json::to_value(record)?;
        let Value::Object(map) = value else {
            return Err(CsvError::NotAnObject);
        };
        rows.push(map.iter().map(|(k, v)| (k.clone(), render(v))).collect());
    }
    Ok(rows)
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serialize rows to CSV text. The header comes from the first row's keys;
/// subsequent rows are emitted in header order, with absent fields empty.
/// An empty input produces an empty string.
pub fn export_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let header: Vec<&str> = first.iter().map(|(k, _)| k.as_str()).collect();

    let mut out = String::new();
    out.push_str(
        &header
            .iter()
            .map(|h| quote_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');

    for row in rows {
        let line: Vec<String> = header
            .iter()
            .map(|key| {
                row.iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| quote_field(v))
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    debug!(rows = rows.len(), "exported csv");
    out
}

/// Parse CSV text by naive line and comma splitting.
///
/// No quote handling: a field exported with an embedded comma comes back as
/// two fields. Rows shorter than the header get empty strings for the
/// missing columns; extra fields are dropped.
pub fn import_csv(text: &str) -> Vec<Row> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header: Vec<&str> = header_line.split(',').collect();

    lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            header
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    (
                        key.to_string(),
                        fields.get(i).map(|f| f.to_string()).unwrap_or_default(),
                    )
                })
                .collect()
        })
        .collect()
}

/// Structured export straight from serializable records.
pub fn export_records<T: Serialize>(records: &[T]) -> Result<String, CsvError> {
    Ok(export_csv(&to_rows(records)?))
}

/// Convenience: parse rows back into JSON objects with string values.
pub fn rows_to_objects(rows: Vec<Row>) -> Vec<Map<String, Value>> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect()
        })
        .collect()
}
