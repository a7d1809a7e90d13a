//! CSV shaping

use serde::Serialize;
use serde_json::Value;

use crate::{ExportError, Result};

/// Escape a single cell.
///
/// Text containing a comma, a double quote or a line break is wrapped in
/// double quotes, with inner quotes doubled.
pub fn sanitize(text: &str) -> String {
    if text.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Render a JSON value as a cell.
///
/// Null becomes an empty cell and strings are used verbatim. Floats print
/// without a trailing `.0` when whole, so `1200.0` is written as `1200`. Every
/// other value (integers, booleans, nested objects and arrays) is written as
/// its JSON text before escaping.
pub fn sanitize_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => sanitize(s),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => sanitize(&f.to_string()),
            _ => sanitize(&n.to_string()),
        },
        other => sanitize(&other.to_string()),
    }
}

/// Convert records into CSV text.
///
/// The first line holds the headers; each following line holds one record's
/// fields in header order. Fields missing from a record are left empty. Lines
/// are separated by `\n` with no trailing newline, and an empty slice yields
/// an empty string.
pub fn to_csv<T: Serialize>(headers: &[&str], records: &[T]) -> Result<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| sanitize(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for (index, record) in records.iter().enumerate() {
        let value = serde_json::to_value(record)?;
        let object = value
            .as_object()
            .ok_or(ExportError::NotAnObject { index })?;

        let row = headers
            .iter()
            .map(|h| object.get(*h).map(sanitize_value).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    Ok(lines.join("\n"))
}
