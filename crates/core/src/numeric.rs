//! Lenient numeric handling for key-result values.
//!
//! Key-result values arrive either as JSON numbers or as decimal strings.
//! Anything that does not parse to a finite number is read as `0.0` so that
//! progress computation stays total.

use serde::{Deserialize, Deserializer};

/// Parse a decimal string, falling back to `0.0` for malformed input.
pub fn parse_lenient(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) => sanitize(v),
        Err(_) => {
            tracing::warn!("Non-numeric key result value {:?}, treating as 0", raw);
            0.0
        }
    }
}

/// Map `NaN` and infinities to `0.0`.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Null(()),
}

/// Deserialize a value that may be a number, a decimal string or null.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => sanitize(n),
        RawNumber::Text(s) => parse_lenient(&s),
        RawNumber::Null(()) => 0.0,
    };
    Ok(value)
}
