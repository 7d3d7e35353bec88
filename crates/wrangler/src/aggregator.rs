//! Configuration aggregation.
//!
//! Responsibilities:
//! - Run the three sources in a fixed order: remote store, environment, then
//!   command-line arguments. Later sources overwrite earlier ones.
//! - Check that every required key was produced.
//! - Return the merged mapping with keys in lexicographic order.
//!
//! Does NOT handle:
//! - Reacting to remote changes (see [`crate::watcher`]).
//! - Retrying transport failures (the client does that before a result
//!   reaches this module).
//!
//! Invariants:
//! - Each pass builds its own mapping; nothing is shared between passes.
//! - Passes on one wrangler (and its clones) never overlap.
//! - A failed step stops the pass; later steps do not run.
//! - Without a remote namespace no client exists and no request is ever sent.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use wrangler_client::{EtcdClient, RetryPolicy};
use wrangler_config::{
    ConfigDescriptor, Environment, ProcessEnvironment, collect_args, collect_env,
    strip_lower_camel,
};

use crate::error::{LoadError, Result};

/// Normalized key to value, ordered by key.
pub type FoundVars = BTreeMap<String, String>;

/// Aggregates configuration for one [`ConfigDescriptor`].
///
/// The descriptor is fixed at construction. To use different settings, build
/// a new wrangler.
///
/// # Example
///
/// ```rust,ignore
/// use config_wrangler::{ConfigDescriptor, ConfigWrangler};
///
/// let descriptor = ConfigDescriptor::new()
///     .with_etcd_namespace("cfg/service/")
///     .with_env_namespace("SERVICE")
///     .with_required_keys(["dbHost"]);
///
/// let wrangler = ConfigWrangler::new(descriptor)?;
/// let vars = wrangler.load().await?;
/// println!("{}", vars["dbHost"]);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigWrangler {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    descriptor: ConfigDescriptor,
    environment: Arc<dyn Environment>,
    client: Option<EtcdClient>,
    pass: Mutex<()>,
}

impl ConfigWrangler {
    /// Create a wrangler that reads the real process environment and arguments.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Remote`] if the store endpoint from `ETCD_CONN`
    /// is not a valid URL.
    pub fn new(descriptor: ConfigDescriptor) -> Result<Self> {
        Self::builder(descriptor).build()
    }

    pub fn builder(descriptor: ConfigDescriptor) -> ConfigWranglerBuilder {
        ConfigWranglerBuilder::new(descriptor)
    }

    pub fn descriptor(&self) -> &ConfigDescriptor {
        &self.inner.descriptor
    }

    /// The remote store client, if a remote namespace is configured.
    pub fn client(&self) -> Option<&EtcdClient> {
        self.inner.client.as_ref()
    }

    /// Run one full aggregation pass.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Remote`] when the range read fails with a protocol error.
    /// - [`LoadError::MissingRequiredKey`] when a required key is absent. The
    ///   caller must treat this as fatal; see [`ConfigWrangler::load_or_exit`].
    pub async fn load(&self) -> Result<FoundVars> {
        let _pass = self.inner.pass.lock().await;

        let mut found = FoundVars::new();
        self.load_remote(&mut found).await?;
        self.load_env(&mut found);
        self.load_args(&mut found);
        check_required(&self.inner.descriptor.required_keys, &found)?;

        info!(keys = found.len(), "Configuration loaded");
        Ok(found)
    }

    /// Like [`ConfigWrangler::load`], but a missing required key prints a
    /// diagnostic to stderr and exits the process with status 1.
    ///
    /// Non-fatal errors are returned unchanged.
    pub async fn load_or_exit(&self) -> Result<FoundVars> {
        match self.load().await {
            Err(err) if err.is_fatal() => err.exit_process(),
            other => other,
        }
    }

    async fn load_remote(&self, found: &mut FoundVars) -> Result<()> {
        let (Some(client), Some(namespace)) =
            (&self.inner.client, self.inner.descriptor.etcd_namespace())
        else {
            debug!("No remote namespace configured, skipping remote store");
            return Ok(());
        };

        let kvs = client.range(namespace).await?;
        for kv in kvs {
            let key = strip_lower_camel(&kv.key, Some(namespace));
            debug!(raw = %kv.key, key = %key, "Collected remote key");
            found.insert(key, kv.value);
        }
        Ok(())
    }

    fn load_env(&self, found: &mut FoundVars) {
        let Some(namespace) = self.inner.descriptor.env_namespace() else {
            return;
        };
        found.extend(collect_env(namespace, self.inner.environment.vars()));
    }

    fn load_args(&self, found: &mut FoundVars) {
        found.extend(collect_args(self.inner.environment.args()));
    }
}

/// Report the first required key missing from `found`, in declaration order.
fn check_required(required: &[String], found: &FoundVars) -> Result<()> {
    match required.iter().find(|key| !found.contains_key(key.as_str())) {
        Some(key) => Err(LoadError::MissingRequiredKey { key: key.clone() }),
        None => Ok(()),
    }
}

/// Builder for [`ConfigWrangler`].
#[derive(Debug)]
pub struct ConfigWranglerBuilder {
    descriptor: ConfigDescriptor,
    environment: Option<Arc<dyn Environment>>,
    endpoint: Option<String>,
    retry: Option<RetryPolicy>,
    cancel: Option<CancellationToken>,
}

impl ConfigWranglerBuilder {
    pub fn new(descriptor: ConfigDescriptor) -> Self {
        Self {
            descriptor,
            environment: None,
            endpoint: None,
            retry: None,
            cancel: None,
        }
    }

    /// Read variables, arguments and `ETCD_CONN` from `environment` instead of
    /// the process.
    pub fn environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Use this store endpoint instead of the one from `ETCD_CONN`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Share a token that cancels remote reads, retries and watches.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Build the wrangler. A client is created only when the descriptor names
    /// a remote namespace.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Remote`] if the store endpoint is invalid.
    pub fn build(self) -> Result<ConfigWrangler> {
        let environment = self
            .environment
            .unwrap_or_else(|| Arc::new(ProcessEnvironment::new()));

        let client = if self.descriptor.remote_enabled() {
            let mut builder =
                EtcdClient::builder().from_descriptor(&self.descriptor, environment.as_ref());
            if let Some(endpoint) = self.endpoint {
                builder = builder.endpoint(endpoint);
            }
            if let Some(policy) = self.retry {
                builder = builder.retry_policy(policy);
            }
            if let Some(token) = self.cancel {
                builder = builder.cancellation(token);
            }
            let client = builder.build()?;
            debug!(
                base_url = client.base_url(),
                api_path = client.api_path(),
                "Remote store enabled"
            );
            Some(client)
        } else {
            None
        };

        Ok(ConfigWrangler {
            inner: Arc::new(Inner {
                descriptor: self.descriptor,
                environment,
                client,
                pass: Mutex::new(()),
            }),
        })
    }
}
