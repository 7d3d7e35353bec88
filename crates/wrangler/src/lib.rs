//! Runtime configuration aggregation.
//!
//! config-wrangler merges configuration from an etcd namespace, prefixed
//! environment variables and `--key=value` arguments into one mapping of
//! lower-camel keys, and can reload that mapping whenever the namespace
//! changes.
//!
//! ```rust,ignore
//! use config_wrangler::{ConfigDescriptor, ConfigWrangler};
//!
//! let wrangler = ConfigWrangler::new(
//!     ConfigDescriptor::new()
//!         .with_etcd_namespace("cfg/service/")
//!         .with_env_namespace("SERVICE"),
//! )?;
//! let vars = wrangler.load_or_exit().await?;
//! ```

pub mod aggregator;
pub mod error;
pub mod watcher;

pub use aggregator::{ConfigWrangler, ConfigWranglerBuilder, FoundVars};
pub use error::{LoadError, Result};
pub use watcher::WatchHandle;

pub use wrangler_client::{CancellationToken, ClientError, RetryPolicy};
pub use wrangler_config::{
    ConfigDescriptor, Environment, ProcessEnvironment, StaticEnvironment, strip_lower_camel,
};
