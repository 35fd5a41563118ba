//! Decoding raw input into the in-memory value model.
//!
//! Documents are represented by [`serde_json::Value`]. Numbers keep whatever
//! representation the parser produced; the canonical encoder always reads them
//! back as `f64`.

pub use serde_json::Value;

/// Error returned when the raw input is not a usable JSON document.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The input is not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The input is valid JSON but its top-level value is not an object.
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// Decodes one JSON document whose top-level value is an object.
pub fn decode(raw: &[u8]) -> Result<Value, DecodeError> {
    let value: Value = serde_json::from_slice(raw)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject(kind_name(&value)));
    }
    Ok(value)
}

/// Human-readable name of a value's JSON kind.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
