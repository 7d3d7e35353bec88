//! Client builder for constructing [`EtcdClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the endpoint (`host:port` or URL) into a base URL
//! - Configuring the underlying HTTP client
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`EtcdClient`] methods in `mod.rs`)
//! - Retry logic for failed requests (handled by [`crate::endpoints::Transport`])
//!
//! # Invariants
//! - The base URL never has a trailing slash
//! - An endpoint without a scheme is reached over plain HTTP
//! - No overall request timeout is set: watch responses stay open indefinitely

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wrangler_config::constants::{DEFAULT_ETCD_API_PATH, DEFAULT_ETCD_ENDPOINT};
use wrangler_config::{ConfigDescriptor, Environment, resolve_endpoint};

use crate::client::EtcdClient;
use crate::endpoints::Transport;
use crate::error::{ClientError, Result};
use crate::retry::RetryPolicy;

/// Builder for creating a new [`EtcdClient`].
///
/// # Example
///
/// ```rust,ignore
/// use wrangler_client::{EtcdClient, RetryPolicy};
///
/// let client = EtcdClient::builder()
///     .endpoint("etcd.internal:2379")
///     .api_path("v3")
///     .retry_policy(RetryPolicy::new().with_max_attempts(5))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct EtcdClientBuilder {
    endpoint: Option<String>,
    api_path: Option<String>,
    retry: RetryPolicy,
    cancel: Option<CancellationToken>,
    connect_timeout: Option<Duration>,
}

impl EtcdClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the store endpoint, as `host:port` or a full `http(s)://` URL.
    ///
    /// Default is `localhost:2379`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the API path segment. Default is `v3alpha`.
    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    /// Set how transport failures are retried.
    ///
    /// Default is unbounded retries with a fixed 3 s delay.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Share a cancellation token with the client. Cancelling it stops
    /// pending retries and open watches.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Bound how long establishing a TCP connection may take.
    ///
    /// A timed-out connect is a transport failure and is retried.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Create a client builder from a descriptor and an environment.
    ///
    /// The endpoint comes from `ETCD_CONN` in `env`; the API path from the
    /// descriptor.
    pub fn from_descriptor(mut self, descriptor: &ConfigDescriptor, env: &dyn Environment) -> Self {
        self.endpoint = Some(resolve_endpoint(env));
        self.api_path = Some(descriptor.api_path().to_string());
        self
    }

    /// Turn an endpoint into a base URL.
    ///
    /// - `"localhost:2379"` -> `"http://localhost:2379"`
    /// - `"http://etcd:2379/"` -> `"http://etcd:2379"`
    /// - `"https://etcd.example.com"` -> `"https://etcd.example.com"`
    fn normalize_base_url(endpoint: &str) -> String {
        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("http://{endpoint}")
        }
    }

    /// Build the [`EtcdClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the endpoint is not a valid URL.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<EtcdClient> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ETCD_ENDPOINT.to_string());
        let base_url = Self::normalize_base_url(&endpoint);

        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.host_str().is_none() {
            return Err(ClientError::InvalidUrl(format!("{base_url}: missing host")));
        }

        let api_path = self
            .api_path
            .map(|path| path.trim_matches('/').to_string())
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| DEFAULT_ETCD_API_PATH.to_string());

        let mut http_builder = reqwest::Client::builder();
        if let Some(timeout) = self.connect_timeout {
            http_builder = http_builder.connect_timeout(timeout);
        }
        let http = http_builder.build()?;

        Ok(EtcdClient {
            transport: Transport::new(http, self.retry, self.cancel.unwrap_or_default()),
            base_url,
            api_path,
        })
    }
}
