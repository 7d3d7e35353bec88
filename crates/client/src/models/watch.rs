//! Watch stream models.

use serde::{Deserialize, Serialize};

use tracing::debug;

use super::kv::{KeyValue, RangeRequest, RawKeyValue, ResponseHeader};

/// Body of a `watch` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchCreateRequest {
    pub create_request: RangeRequest,
}

impl WatchCreateRequest {
    pub fn prefix(namespace: &str) -> Self {
        Self {
            create_request: RangeRequest::prefix(namespace),
        }
    }
}

/// Kind of change carried by a watch event.
///
/// `PUT` is the proto3 default and is therefore omitted on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    #[default]
    Put,
    Delete,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type", default)]
    pub kind: EventType,
    #[serde(default)]
    pub kv: Option<RawKeyValue>,
    #[serde(default)]
    pub prev_kv: Option<RawKeyValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWatchResult {
    #[serde(default)]
    pub header: Option<ResponseHeader>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub watch_id: Option<i64>,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub canceled: bool,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// One JSON object from the watch response stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchFrame {
    #[serde(default)]
    pub result: Option<RawWatchResult>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl WatchFrame {
    /// Decode the frame into a response, or `None` when it carries no events.
    ///
    /// An event whose key/value cannot be decoded is still reported, with
    /// `kv` left empty. The event itself is the change notification.
    pub fn into_response(self) -> Option<WatchResponse> {
        let result = self.result?;
        if result.events.is_empty() {
            return None;
        }
        let events = result
            .events
            .iter()
            .map(|event| WatchEvent {
                kind: event.kind,
                kv: event.kv.as_ref().and_then(|kv| match kv.decode() {
                    Ok(kv) => Some(kv),
                    Err(err) => {
                        debug!(error = %err, "Undecodable key/value in watch event");
                        None
                    }
                }),
            })
            .collect();
        Some(WatchResponse {
            header: result.header,
            watch_id: result.watch_id,
            events,
        })
    }
}

/// A decoded change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: EventType,
    pub kv: Option<KeyValue>,
}

/// A watch frame that carried at least one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchResponse {
    pub header: Option<ResponseHeader>,
    pub watch_id: Option<i64>,
    pub events: Vec<WatchEvent>,
}
