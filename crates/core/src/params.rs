//! Total helpers for reading typed values out of a `serde_json::Value` spec.
//!
//! Source and brush specs are free-form JSON objects; these helpers extract
//! one field each, falling back to a default when the key is missing or has
//! the wrong type. They never fail.

use serde_json::Value;

/// Extracts an `f64` from `spec[name]`, returning `default` if missing or
/// not a number. JSON integers are widened to f64.
pub fn param_f64(spec: &Value, name: &str, default: f64) -> f64 {
    spec.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `u64` from `spec[name]`, returning `default` if missing,
/// negative, or not an integer.
pub fn param_u64(spec: &Value, name: &str, default: u64) -> u64 {
    spec.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `String` from `spec[name]`, returning `default` if missing or
/// not a string.
pub fn param_string(spec: &Value, name: &str, default: &str) -> String {
    spec.get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}
