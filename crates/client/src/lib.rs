//! HTTP client for the etcd v3 JSON gateway.
//!
//! This crate provides the remote half of config-wrangler: a prefix range
//! read and an open-ended watch over one namespace, with transport failures
//! retried transparently and protocol failures surfaced once.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod retry;
mod serde_helpers;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::EtcdClient;
pub use client::builder::EtcdClientBuilder;
pub use endpoints::{FrameDecoder, Transport, WatchStream};
pub use error::{ClientError, Result};
pub use models::{EventType, KeyValue, ResponseHeader, WatchEvent, WatchResponse};
pub use retry::RetryPolicy;
pub use tokio_util::sync::CancellationToken;
