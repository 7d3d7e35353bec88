//! Configuration descriptor types.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ETCD_API_PATH;

/// User-supplied settings that decide which sources take part in aggregation.
///
/// Every field is optional. Leaving `etcd_namespace` unset disables the
/// remote store entirely (and makes watching a no-op); leaving
/// `env_namespace` unset disables the environment source. The serialized
/// form keeps the established camel-case field names (`etcdNameSpace`,
/// `envNameSpace`, `etcdApiPath`, `requiredKeys`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigDescriptor {
    /// Remote key prefix, e.g. `cfg/service/`.
    #[serde(rename = "etcdNameSpace", alias = "etcdNamespace")]
    pub etcd_namespace: Option<String>,
    /// Environment variable prefix, without the trailing underscore.
    #[serde(rename = "envNameSpace", alias = "envNamespace")]
    pub env_namespace: Option<String>,
    /// API path segment of the remote store (`v3alpha` when unset).
    pub etcd_api_path: Option<String>,
    /// Normalized keys that must be present after aggregation.
    pub required_keys: Vec<String>,
}

impl ConfigDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_etcd_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.etcd_namespace = Some(namespace.into());
        self
    }

    pub fn with_env_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.env_namespace = Some(namespace.into());
        self
    }

    pub fn with_etcd_api_path(mut self, path: impl Into<String>) -> Self {
        self.etcd_api_path = Some(path.into());
        self
    }

    pub fn with_required_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// The remote namespace, or `None` when unset or blank.
    pub fn etcd_namespace(&self) -> Option<&str> {
        non_blank(self.etcd_namespace.as_deref())
    }

    /// The environment namespace, or `None` when unset or blank.
    pub fn env_namespace(&self) -> Option<&str> {
        non_blank(self.env_namespace.as_deref())
    }

    /// The API path segment with surrounding slashes removed.
    pub fn api_path(&self) -> &str {
        non_blank(self.etcd_api_path.as_deref())
            .map(|path| path.trim_matches('/'))
            .unwrap_or(DEFAULT_ETCD_API_PATH)
    }

    /// True when the remote store takes part in aggregation.
    pub fn remote_enabled(&self) -> bool {
        self.etcd_namespace().is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
