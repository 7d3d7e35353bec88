//! Serde helpers for the gateway's JSON encoding of protobuf scalars.
//!
//! Responsibilities:
//! - Accept 64-bit integers encoded either as JSON strings (the proto3 JSON
//!   mapping) or as plain numbers.
//!
//! Invariants / assumptions:
//! - Fields at their proto3 default are omitted by the gateway, so every
//!   helper here is paired with `#[serde(default)]` at the use site.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum I64OrString {
    I64(i64),
    U64(u64),
    String(String),
}

pub fn opt_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<I64OrString>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(I64OrString::I64(v)) => Ok(Some(v)),
        Some(I64OrString::U64(v)) => Ok(Some(i64::try_from(v).map_err(D::Error::custom)?)),
        Some(I64OrString::String(s)) => Ok(Some(s.parse::<i64>().map_err(D::Error::custom)?)),
    }
}

pub fn opt_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<I64OrString>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(I64OrString::I64(v)) => Ok(Some(u64::try_from(v).map_err(D::Error::custom)?)),
        Some(I64OrString::U64(v)) => Ok(Some(v)),
        Some(I64OrString::String(s)) => Ok(Some(s.parse::<u64>().map_err(D::Error::custom)?)),
    }
}
