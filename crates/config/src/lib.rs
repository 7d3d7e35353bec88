//! Configuration inputs for config-wrangler.
//!
//! This crate owns everything that is local to the process: the
//! [`ConfigDescriptor`] handed in by the embedding application, the key
//! normalizer shared by every source, and the environment variable and
//! command-line extraction steps.

pub mod constants;
mod loader;
pub mod normalize;
pub mod types;

pub use loader::{
    ConfigError, Environment, ProcessEnvironment, StaticEnvironment, collect_args, collect_env,
    env_var_or_none, load_dotenv, resolve_endpoint,
};
pub use normalize::strip_lower_camel;
pub use types::ConfigDescriptor;
