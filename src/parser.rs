//! Parser helpers for Buda REST responses
//!
//! Upstream encodes most numbers as strings (`"879658.0"`) and money values as
//! `[amount, currency]` pairs. These helpers coerce them into typed values.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Result, SpreadError};

/// Coerce a JSON number or numeric string into a finite `f64`
pub fn coerce_f64(raw: &Value) -> Result<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(SpreadError::ParseError(format!(
            "expected a numeric value, got {}",
            raw
        ))),
    }
}

/// Custom deserializer for `f64` from a string or number
pub fn deserialize_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    coerce_f64(&raw).map_err(serde::de::Error::custom)
}

/// Custom deserializer for fields kept verbatim as text.
///
/// Upstream is inconsistent about quoting fee-like fields, so numbers and
/// booleans are accepted and rendered back to their JSON text.
pub fn deserialize_opaque_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
