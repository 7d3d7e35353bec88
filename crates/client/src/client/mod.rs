//! Main etcd gateway client.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Merging results into configuration (handled by the aggregator crate)
//!
//! # Invariants
//! - A client only reads; there is no write path
//! - Both operations target a single namespace prefix per call

pub mod builder;

use tokio_util::sync::CancellationToken;

use crate::endpoints::{self, Transport, WatchStream};
use crate::error::Result;
use crate::models::KeyValue;
use crate::retry::RetryPolicy;

/// etcd v3 JSON gateway client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use wrangler_client::EtcdClient;
///
/// let client = EtcdClient::builder().endpoint("localhost:2379").build()?;
/// let kvs = client.range("cfg/service/").await?;
/// ```
///
/// Cloning is cheap: clones share the HTTP connection pool and the
/// cancellation token.
#[derive(Debug, Clone)]
pub struct EtcdClient {
    pub(crate) transport: Transport,
    pub(crate) base_url: String,
    pub(crate) api_path: String,
}

impl EtcdClient {
    /// Create a new client builder.
    pub fn builder() -> builder::EtcdClientBuilder {
        builder::EtcdClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API path segment.
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.transport.retry_policy()
    }

    /// Token that cancels this client's retries and watches.
    pub fn cancellation(&self) -> &CancellationToken {
        self.transport.cancellation()
    }

    /// Read every key/value pair under `namespace`.
    pub async fn range(&self, namespace: &str) -> Result<Vec<KeyValue>> {
        endpoints::range(&self.transport, &self.base_url, &self.api_path, namespace).await
    }

    /// Subscribe to changes under `namespace`.
    pub fn watch(&self, namespace: &str) -> WatchStream {
        endpoints::watch(
            self.transport.clone(),
            &self.base_url,
            &self.api_path,
            namespace,
        )
    }
}
