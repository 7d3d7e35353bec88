//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Separate recoverable failures (the remote store answered badly) from the
//!   fatal outcome of a required key that no source produced.
//!
//! Does NOT handle:
//! - Terminating the process. Only [`crate::ConfigWrangler::load_or_exit`]
//!   turns a fatal error into an exit.
//!
//! Invariants:
//! - Transport failures never reach this type; the client retries them.

use thiserror::Error;
use wrangler_client::ClientError;
use wrangler_config::constants::MISSING_REQUIRED_KEY_EXIT_CODE;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    /// The remote store step failed with a protocol error.
    #[error("Remote store error: {0}")]
    Remote(#[from] ClientError),

    /// A required key was absent after every source ran.
    #[error("Missing required config key \"{key}\"")]
    MissingRequiredKey { key: String },
}

impl LoadError {
    /// True when the process must not continue with this configuration.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingRequiredKey { .. })
    }

    /// True when the load stopped because the client was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Remote(ClientError::Cancelled))
    }

    /// Print `config-wrangler: <error>, exiting.` to stderr and exit with
    /// status 1.
    pub fn exit_process(&self) -> ! {
        eprintln!("config-wrangler: {self}, exiting.");
        std::process::exit(MISSING_REQUIRED_KEY_EXIT_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_fatal() {
        let err = LoadError::MissingRequiredKey {
            key: "apiKey".to_string(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Missing required config key \"apiKey\"");
    }

    #[test]
    fn test_remote_errors_are_not_fatal() {
        let err = LoadError::from(ClientError::NoResults);
        assert!(!err.is_fatal());
        assert!(!err.is_cancelled());
        assert_eq!(err.to_string(), "Remote store error: No results found");
    }

    #[test]
    fn test_cancelled_remote_error() {
        assert!(LoadError::from(ClientError::Cancelled).is_cancelled());
    }
}
