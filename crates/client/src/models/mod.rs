//! Data models for the etcd v3 JSON gateway.
//!
//! Wire types mirror the gateway's JSON encoding: byte fields are base64
//! strings and 64-bit integers may arrive as strings. Public types carry
//! decoded text.

pub mod kv;
pub mod watch;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ClientError, Result};

pub use kv::{KeyValue, RangeRequest, RangeResponse, RawKeyValue, ResponseHeader};
pub use watch::{EventType, RawEvent, WatchCreateRequest, WatchEvent, WatchFrame, WatchResponse};

/// Encode text as a base64 byte string.
pub fn encode_bytes(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a base64 byte string into text.
///
/// Bytes that are not valid UTF-8 become U+FFFD; etcd values are arbitrary
/// bytes, so only malformed base64 is an error.
pub fn decode_bytes(field: &str, encoded: &str) -> Result<String> {
    let raw = STANDARD
        .decode(encoded)
        .map_err(|e| ClientError::InvalidResponse(format!("{field} is not valid base64: {e}")))?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}
