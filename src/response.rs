//! Response rendering helpers
//!
//! Pure functions that turn a `ResponseState` into display data. The draw
//! layer only lays these out; nothing here touches the terminal.

use crate::state::ResponseState;
use serde_json::Value;

/// A nested object flattened into a header row and one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTable {
    /// Top-level key the object was found under
    pub name: String,
    pub columns: Vec<String>,
    pub row: Vec<String>,
}

/// What the response panel should show
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseView<'a> {
    Loading,
    Error(&'a str),
    Body(&'a Value),
    Empty,
}

impl<'a> ResponseView<'a> {
    pub fn from_state(response: &'a ResponseState) -> Self {
        if let Some(error) = &response.error {
            ResponseView::Error(error)
        } else if let Some(body) = &response.body {
            ResponseView::Body(body)
        } else if response.loading {
            ResponseView::Loading
        } else {
            ResponseView::Empty
        }
    }
}

/// `Status: 200 | Response Time: 12.34 ms`, only once a status is known
pub fn status_line(response: &ResponseState) -> Option<String> {
    let status = response.status?;
    let time = response.response_time_ms.unwrap_or_default();
    Some(format!("Status: {status} | Response Time: {time:.2} ms"))
}

/// Pretty-print with two space indentation
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Flatten one level of a JSON object into tables.
///
/// Each top-level key holding an object becomes one table. Arrays and
/// primitives at the top level, or under a key, produce nothing.
pub fn flatten_tables(value: &Value) -> Vec<FlatTable> {
    let Value::Object(map) = value else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(name, nested)| match nested {
            Value::Object(fields) => Some(FlatTable {
                name: name.clone(),
                columns: fields.keys().cloned().collect(),
                row: fields.values().map(cell_text).collect(),
            }),
            _ => None,
        })
        .collect()
}

/// Strings and numbers verbatim, everything else as compact JSON
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
