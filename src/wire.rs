// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared wire dictionary decoding helpers.
//!
//! Every payload crossing the command boundary is a flat or nested
//! string-keyed JSON dictionary. Numeric fields may arrive as native numbers,
//! JSON numbers, or numeric strings and must be accepted in all three forms;
//! this module performs that coercion exactly once, at the boundary, so the
//! rest of the crate only ever sees typed values.

use serde_json::{Map, Value};

use crate::errors::WireError;

/// Short JSON shape name used in error messages.
fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interpret a payload as a dictionary.
pub fn as_object(value: &Value) -> Result<&Map<String, Value>, WireError> {
    value
        .as_object()
        .ok_or_else(|| WireError::invalid_shape(shape_of(value)))
}

/// Coerce a value to `u64`, accepting native numbers, JSON numbers, and
/// numeric strings.
pub fn as_u64(field: &str, value: &Value) -> Result<u64, WireError> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(v);
            }
            // JSON numbers may arrive as floats; accept integral ones.
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
                .ok_or_else(|| WireError::invalid_number(field, n.to_string()))
        }
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| WireError::invalid_number(field, s.clone())),
        other => Err(WireError::invalid_number(field, shape_of(other))),
    }
}

/// Fetch a required `u64` field from a dictionary.
pub fn get_u64(map: &Map<String, Value>, field: &str) -> Result<u64, WireError> {
    let value = map
        .get(field)
        .ok_or_else(|| WireError::missing_field(field))?;
    as_u64(field, value)
}

/// Fetch an optional `u64` field, defaulting when absent or null.
pub fn opt_u64(map: &Map<String, Value>, field: &str, default: u64) -> Result<u64, WireError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => as_u64(field, value),
    }
}

/// Fetch a required string field from a dictionary.
pub fn get_str(map: &Map<String, Value>, field: &str) -> Result<String, WireError> {
    map.get(field)
        .ok_or_else(|| WireError::missing_field(field))?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| WireError::invalid_type(field, "string"))
}

/// Fetch an optional string field, defaulting to empty when absent or null.
pub fn opt_str(map: &Map<String, Value>, field: &str) -> Result<String, WireError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(value) => value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| WireError::invalid_type(field, "string")),
    }
}

/// Fetch a required array field from a dictionary.
pub fn get_array<'a>(
    map: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, WireError> {
    map.get(field)
        .ok_or_else(|| WireError::missing_field(field))?
        .as_array()
        .ok_or_else(|| WireError::invalid_type(field, "array"))
}

/// Fetch a required nested dictionary field.
pub fn get_object<'a>(
    map: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Map<String, Value>, WireError> {
    map.get(field)
        .ok_or_else(|| WireError::missing_field(field))?
        .as_object()
        .ok_or_else(|| WireError::invalid_type(field, "object"))
}

/// Fetch an array of strings, rejecting non-string elements.
pub fn get_string_array(map: &Map<String, Value>, field: &str) -> Result<Vec<String>, WireError> {
    get_array(map, field)?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_owned)
                .ok_or_else(|| WireError::invalid_type(field, "array of strings"))
        })
        .collect()
}
