//! Field parser for raw intake cells
//!
//! A raw cell arrives either as text (which may itself hold JSON), as an
//! already-structured JSON value, or not at all. [`parse_cell`] attempts a
//! structured decode of text cells and falls back to treating the text as a
//! scalar; it never fails.

use serde_json::Value;

use crate::models::field::{DurationField, FieldValue, TokenList};

/// Parse a raw cell into a [`FieldValue`]
///
/// # Arguments
/// * `cell` - The raw cell; `Value::Null` stands for an absent cell
///
/// # Returns
/// `Absent` for null or blank input, otherwise the decoded shape. Text that
/// is not valid JSON becomes a trimmed `Scalar`.
#[must_use]
pub fn parse_cell(cell: &Value) -> FieldValue {
    match cell {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return FieldValue::Absent;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(decoded) => from_structured(&decoded),
                Err(_) => FieldValue::Scalar(trimmed.to_string()),
            }
        }
        structured => from_structured(structured),
    }
}

/// Convert a decoded value without attempting a second decode
fn from_structured(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Absent,
        Value::Array(items) => FieldValue::List(
            items
                .iter()
                .filter_map(element_text)
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        Value::Object(map) => FieldValue::Mapping(
            map.iter()
                .map(|(key, value)| (key.clone(), element_text(value).unwrap_or_default()))
                .collect(),
        ),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                FieldValue::Absent
            } else {
                FieldValue::Scalar(trimmed.to_string())
            }
        }
        Value::Number(n) => FieldValue::Scalar(n.to_string()),
        Value::Bool(b) => FieldValue::Scalar(b.to_string()),
    }
}

/// Stringify a list element or mapping value, trimmed; `None` for null
#[must_use]
pub fn element_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        nested => Some(nested.to_string()),
    }
}

/// Parse a list-valued cell such as `symptoms` or `initial_symptom`
///
/// Accepts a JSON list, comma-delimited text or a bare scalar.
#[must_use]
pub fn parse_list(cell: &Value) -> TokenList {
    parse_cell(cell).into_tokens()
}

/// Parse the `symptom_duration` cell
///
/// Anything other than a mapping is reported as [`DurationField::Unavailable`]
/// so the caller can skip duration statistics for this record only.
#[must_use]
pub fn parse_durations(cell: &Value) -> DurationField {
    parse_cell(cell).into_durations()
}

/// Read a scalar text field (gender, specialist) without decoding it
///
/// Returns the trimmed raw text, or `None` when the cell is null or blank.
#[must_use]
pub fn scalar_text(cell: &Value) -> Option<String> {
    let text = match cell {
        Value::Null => return None,
        Value::String(text) => text.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        structured => structured.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
