//! Payload accessors
//!
//! Senders encode numbers as integers or floats depending on their own
//! runtime, so every accessor here accepts whatever representation arrived
//! and falls back to a zero value instead of failing.

use serde_json::{Map, Value};

/// Read an integer count from the payload
///
/// Accepts signed and unsigned JSON integers and floats (truncated toward
/// zero). Missing keys, non-numeric values and non-finite floats read as 0.
pub fn int_field(data: &Map<String, Value>, key: &str) -> i64 {
    let Some(Value::Number(number)) = data.get(key) else {
        return 0;
    };
    if let Some(value) = number.as_i64() {
        value
    } else if let Some(value) = number.as_u64() {
        i64::try_from(value).unwrap_or(i64::MAX)
    } else {
        match number.as_f64() {
            // Saturating float-to-int cast
            Some(value) if value.is_finite() => value as i64,
            _ => 0,
        }
    }
}

/// Read a string field from the payload, empty when absent or not a string
pub fn str_field<'a>(data: &'a Map<String, Value>, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Name the concrete type a payload field arrived as
pub fn value_kind(data: &Map<String, Value>, key: &str) -> &'static str {
    match data.get(key) {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "bool",
        Some(Value::Number(number)) if number.is_i64() => "int",
        Some(Value::Number(number)) if number.is_u64() => "uint",
        Some(Value::Number(_)) => "float",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
