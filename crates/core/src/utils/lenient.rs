//! Forgiving decoders for stored rows.
//!
//! Stored records may carry values written by older clients: free-form
//! territory JSON, legacy phase names, unknown roles. Reading such a row
//! falls back to a default for that one field instead of failing the whole
//! collection. Inputs (`New*`, `*Update`) keep strict decoding.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::any::type_name;
use std::str::FromStr;

/// Deserializes `T`, substituting `T::default()` for values that do not fit.
pub fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
        warn!("Ignoring unrecognised {} value {}: {}", short_name::<T>(), raw, e);
        T::default()
    }))
}

/// Deserializes `Option<T>`, mapping values that do not fit to `None`.
pub fn deserialize_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring unrecognised {} value {}: {}", short_name::<T>(), raw, e);
            Ok(None)
        }
    }
}

/// Parses a stored text column, substituting `T::default()` when it is unknown.
pub fn parse_or_default<T>(raw: &str) -> T
where
    T: FromStr + Default,
{
    raw.parse().unwrap_or_else(|_| {
        warn!("Ignoring unrecognised {} value '{}'", short_name::<T>(), raw);
        T::default()
    })
}

/// Parses an optional stored text column, mapping unknown values to `None`.
pub fn parse_option<T: FromStr>(raw: Option<&str>) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unrecognised {} value '{}'", short_name::<T>(), raw);
            None
        }
    }
}

/// Decodes a stored JSON text column, mapping malformed documents to `None`.
pub fn parse_json_option<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring malformed {} document: {}", short_name::<T>(), e);
            None
        }
    }
}

fn short_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
