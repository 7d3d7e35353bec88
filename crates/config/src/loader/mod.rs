//! Local configuration inputs.
//!
//! Responsibilities:
//! - Extract key/value pairs from the environment and the command line.
//! - Load a descriptor from a JSON file and `.env` files from disk.
//!
//! Does NOT handle:
//! - Talking to the remote store (see the client crate).
//! - Merging sources or enforcing required keys (see the aggregator).

mod args;
mod env;
mod environment;
mod error;
mod file;

pub use args::collect_args;
pub use env::{collect_env, env_var_or_none, resolve_endpoint};
pub use environment::{Environment, ProcessEnvironment, StaticEnvironment};
pub use error::ConfigError;
pub use file::load_dotenv;
