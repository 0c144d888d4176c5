//! Tolerant decoders for catalog exports.
//!
//! Upstream exports are not consistent about field encodings: list and object
//! fields sometimes arrive as JSON-encoded strings, and prices sometimes as
//! numeric strings. Every decoder here degrades to an empty/absent value
//! instead of failing the whole record.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Decode `T` from a JSON value or from a string that holds JSON.
pub fn json_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(decode_value(raw))
}

/// Like [`json_or_default`] for optional nested blocks.
pub fn json_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(decode_optional(raw))
}

/// Numeric field that may be a number, a numeric string, or junk.
pub fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(number_from_value(&raw))
}

/// Text field that may be missing, `null`, or a bare number (card numbers).
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Ownership count; negative or non-numeric input counts as zero.
pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(number_from_value(&raw)
        .filter(|n| *n > 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

/// Single integer that may also arrive as a list (first entry wins).
pub fn first_integer<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let value = match raw {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    };
    Ok(number_from_value(&value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32))
}

/// Tolerant boolean: accepts `true`/`false`, `0`/`1` and their string forms.
pub fn flag_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
        }
        _ => false,
    })
}

pub fn decode_value<T: DeserializeOwned + Default>(raw: Value) -> T {
    decode_optional(raw).unwrap_or_default()
}

fn decode_optional<T: DeserializeOwned>(raw: Value) -> Option<T> {
    let value = match raw {
        Value::Null => return None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::debug!(
                        target: "cardex::model",
                        error = %err,
                        "embedded JSON field failed to parse; using empty value"
                    );
                    return None;
                }
            }
        }
        other => other,
    };

    match serde_json::from_value::<T>(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::debug!(
                target: "cardex::model",
                error = %err,
                "field has unexpected shape; using empty value"
            );
            None
        }
    }
}

fn number_from_value(raw: &Value) -> Option<f64> {
    let n = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
