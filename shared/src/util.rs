//! Lenient decoding helpers for backend records
//!
//! The backend serializes decimals inconsistently (JSON numbers, numeric
//! strings such as `"12.50"`, `null`, or an empty string for unset fields).
//! These helpers decode all of those without failing the whole record:
//! anything that is not a finite number becomes `0`, anything that is not a
//! usable identifier becomes `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an arbitrary JSON value into a finite `f64`, defaulting to `0.0`
pub fn number_or_zero(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or_default(),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Coerce an arbitrary JSON value into a record identifier
pub fn id_or_none(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// `#[serde(deserialize_with = "shared::util::lenient_f64")]`
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_or_zero).unwrap_or_default())
}

/// `#[serde(deserialize_with = "shared::util::lenient_opt_f64")]`
///
/// Keeps the distinction between "absent/null" and "present".
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(number_or_zero(&v)),
    })
}

/// `#[serde(deserialize_with = "shared::util::lenient_id")]`
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_or_none))
}

/// `#[serde(deserialize_with = "shared::util::lenient_string")]`
///
/// Empty strings collapse to `None`; numbers are rendered as text.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
