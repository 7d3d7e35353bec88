//! Testing utilities for etcd client tests.
//!
//! Builders for gateway-shaped JSON bodies, so tests can describe store
//! contents as plain text pairs. Available when running tests or when the
//! `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use wrangler_client::testing::{range_body, watch_stream_body, created_frame, event_frame};
//!
//! let body = range_body(&[("cfg/svc/db_host", "db.internal")]);
//! let stream = watch_stream_body(&[created_frame(), event_frame(&[("cfg/svc/a", "1")])]);
//! ```

use serde_json::{Value, json};

use crate::models::encode_bytes;

fn kv_json(key: &str, value: &str, revision: i64) -> Value {
    json!({
        "key": encode_bytes(key),
        "value": encode_bytes(value),
        "create_revision": revision.to_string(),
        "mod_revision": revision.to_string(),
        "version": "1",
    })
}

/// A `kv/range` response listing `pairs`.
pub fn range_body(pairs: &[(&str, &str)]) -> Value {
    let kvs: Vec<Value> = pairs
        .iter()
        .enumerate()
        .map(|(i, (key, value))| kv_json(key, value, i as i64 + 2))
        .collect();
    json!({
        "header": {
            "cluster_id": "14841639068965178418",
            "member_id": "10276657743932975437",
            "revision": (pairs.len() as i64 + 1).to_string(),
            "raft_term": "2",
        },
        "kvs": kvs,
        "count": pairs.len().to_string(),
    })
}

/// A `kv/range` response for a namespace with no keys (no `kvs` field).
pub fn empty_range_body() -> Value {
    json!({
        "header": {
            "cluster_id": "14841639068965178418",
            "revision": "1",
        }
    })
}

/// The first frame of every watch: acknowledges creation, carries no events.
pub fn created_frame() -> Value {
    json!({
        "result": {
            "header": {"revision": "1"},
            "created": true,
        }
    })
}

/// A watch frame with one PUT event per pair.
pub fn event_frame(pairs: &[(&str, &str)]) -> Value {
    let events: Vec<Value> = pairs
        .iter()
        .map(|(key, value)| json!({"kv": kv_json(key, value, 10)}))
        .collect();
    json!({
        "result": {
            "header": {"revision": "10"},
            "events": events,
        }
    })
}

/// Concatenate frames the way the gateway streams them: one JSON object per line.
pub fn watch_stream_body(frames: &[Value]) -> String {
    frames
        .iter()
        .map(|frame| format!("{frame}\n"))
        .collect()
}
