//! Payload decoder module
//! Reads loosely-typed provider JSON without turning missing data into zeros

use serde_json::Value;

use crate::models::Field;

/// Number at a JSON pointer; numeric strings are accepted
pub fn f64_at(value: &Value, pointer: &str) -> Option<f64> {
    let number = match value.pointer(pointer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

pub fn u64_at(value: &Value, pointer: &str) -> Option<u64> {
    match value.pointer(pointer)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn bool_at(value: &Value, pointer: &str) -> Option<bool> {
    value.pointer(pointer)?.as_bool()
}

pub fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer)?.as_str()
}

/// Authority presence.
///
/// Absent key -> `Unknown`, `null` or empty -> renounced, any address -> present.
pub fn authority_at(value: &Value, pointer: &str) -> Field<bool> {
    match value.pointer(pointer) {
        None => Field::Unknown,
        Some(Value::Null) => Field::Known(false),
        Some(Value::String(s)) => Field::Known(!s.trim().is_empty()),
        Some(_) => Field::Unknown,
    }
}

/// Both authorities known and absent
pub fn renounced_from(mint: &Field<bool>, freeze: &Field<bool>) -> Field<bool> {
    match (mint, freeze) {
        (Field::Known(true), _) | (_, Field::Known(true)) => Field::Known(false),
        (Field::Known(false), Field::Known(false)) => Field::Known(true),
        _ => Field::Unknown,
    }
}

/// Basis points (0..=10_000) to percent
pub fn bps_to_pct(bps: u64) -> f64 {
    bps.min(10_000) as f64 / 100.0
}
