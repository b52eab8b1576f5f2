//! Serde helpers for integers that travel as decimal strings.
//!
//! uint256 values (amounts, identifiers, timestamps, counters) exceed the
//! safe range of JSON numbers, so the marketplace API expects them quoted.

use serde::de::{self, Deserialize, Deserializer};
use serde::Serializer;
use std::fmt::Display;
use std::str::FromStr;

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Accepts both `"123"` and `123`.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let text = match raw {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(de::Error::custom(format!(
                "expected decimal string or number, got {}",
                other
            )))
        }
    };
    text.parse().map_err(de::Error::custom)
}
