//! Raw string → typed scalar.
//!
//! Recognition order, first match wins:
//!
//! 1. `{}` → empty map
//! 2. `[]` → empty array
//! 3. `null` → null
//! 4. whole integer → `Integer`
//! 5. floating point → `Float` (32-bit precision on 32-bit targets)
//! 6. boolean literal → `Bool`
//! 7. `"..."` → the text between the quotes, always a string
//! 8. anything else → the raw string
//!
//! Wrapping a value in double quotes is how a caller keeps `"42"` or `"true"`
//! a string.

use crate::array::SparseArray;
use crate::value::{Map, Value};

/// Convert a raw value into the typed value stored in the document.
pub fn sanitize(raw: &str) -> Value {
    match raw {
        "{}" => return Value::Map(Map::new()),
        "[]" => return Value::Array(SparseArray::new()),
        "null" => return Value::Null,
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Some(f) = parse_float(raw) {
        return Value::Float(f);
    }
    if let Some(b) = parse_bool(raw) {
        return Value::Bool(b);
    }
    Value::String(unquote(raw).to_string())
}

#[cfg(target_pointer_width = "32")]
fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f32>().ok().map(f64::from)
}

#[cfg(not(target_pointer_width = "32"))]
fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "True" | "TRUE" | "t" | "T" => Some(true),
        "false" | "False" | "FALSE" | "f" | "F" => Some(false),
        _ => None,
    }
}

/// Strip exactly one pair of surrounding double quotes.
fn unquote(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}
