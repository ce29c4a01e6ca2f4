//! Structured array reader.
//!
//! Input is a JSON array of objects. Each object becomes one record with
//! fields in the object's own order.

use serde_json::Value;
use serde_json::error::Category;

use super::traits::{FormatReader, RawRecords, decode_utf8};
use crate::error::FormatError;
use crate::models::RawRecord;

const FORMAT_NAME: &str = "JSON";

/// Reader for arrays of key-value objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuredReader;

impl StructuredReader {
    /// Creates a new structured reader
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Parses a JSON document whose top level must be an array
pub(crate) fn parse_array(content: &[u8], format: &'static str) -> Result<Vec<Value>, FormatError> {
    let text = decode_utf8(content)?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(FormatError::NotAnArray {
            format,
            found: value_kind(&other),
        }),
        Err(e) if e.classify() == Category::Eof => Err(FormatError::Truncated {
            format,
            line: e.line(),
            column: e.column(),
        }),
        Err(e) => Err(FormatError::Syntax {
            format,
            line: e.line(),
            column: e.column(),
            reason: e.to_string(),
        }),
    }
}

/// Name of a JSON value's kind for error messages
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Textual form of a field value; `None` for null
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn to_raw_record(index: usize, item: &Value) -> Result<RawRecord, FormatError> {
    let position = index + 1;
    let Value::Object(map) = item else {
        return Err(FormatError::UnexpectedElement {
            format: FORMAT_NAME,
            position,
            found: value_kind(item),
        });
    };
    let fields = map
        .iter()
        .filter_map(|(name, value)| value_text(value).map(|text| (name.clone(), text)))
        .collect();
    Ok(RawRecord::new(position, fields))
}

impl FormatReader for StructuredReader {
    fn source_id(&self) -> &'static str {
        "structured"
    }

    fn display_name(&self) -> &'static str {
        "Structured array"
    }

    fn read<'a>(&self, content: &'a [u8]) -> Result<RawRecords<'a>, FormatError> {
        let items = parse_array(content, FORMAT_NAME)?;
        tracing::trace!(elements = items.len(), "Parsed structured array");

        Ok(Box::new(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| to_raw_record(index, &item)),
        ))
    }
}
