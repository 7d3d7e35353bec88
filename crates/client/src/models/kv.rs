//! Range read models.

use serde::{Deserialize, Serialize};
use wrangler_config::constants::RANGE_END_SUFFIX;

use super::{decode_bytes, encode_bytes};
use crate::error::Result;

/// Body of a `kv/range` request: every key in `[key, range_end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeRequest {
    pub key: String,
    pub range_end: String,
}

impl RangeRequest {
    /// Prefix scan over `namespace`.
    ///
    /// The upper bound is the namespace followed by a run of `z`, which
    /// covers the printable keys stored under it.
    pub fn prefix(namespace: &str) -> Self {
        Self {
            key: encode_bytes(namespace),
            range_end: encode_bytes(&format!("{namespace}{RANGE_END_SUFFIX}")),
        }
    }
}

/// Response header common to every gateway response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseHeader {
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_u64_from_string_or_number"
    )]
    pub cluster_id: Option<u64>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_u64_from_string_or_number"
    )]
    pub member_id: Option<u64>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub revision: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_u64_from_string_or_number"
    )]
    pub raft_term: Option<u64>,
}

/// A key/value pair as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawKeyValue {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub create_revision: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub mod_revision: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub version: Option<i64>,
}

impl RawKeyValue {
    /// Decode the base64 key and value into text.
    pub fn decode(&self) -> Result<KeyValue> {
        Ok(KeyValue {
            key: decode_bytes("key", &self.key)?,
            value: decode_bytes("value", &self.value)?,
            mod_revision: self.mod_revision,
            version: self.version,
        })
    }
}

/// A decoded key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    pub mod_revision: Option<i64>,
    pub version: Option<i64>,
}

/// Body of a `kv/range` response.
///
/// The gateway omits `kvs` entirely when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeResponse {
    #[serde(default)]
    pub header: Option<ResponseHeader>,
    #[serde(default)]
    pub kvs: Option<Vec<RawKeyValue>>,
    #[serde(default)]
    pub more: bool,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub count: Option<i64>,
}
