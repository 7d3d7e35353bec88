//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map load and client errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - A missing required key always exits with 1, whichever path reports it.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use config_wrangler::{ClientError, LoadError};
use wrangler_config::constants::MISSING_REQUIRED_KEY_EXIT_CODE;

/// Structured exit codes for config-wrangler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Configuration loaded (or watch stopped cleanly).
    Success = 0,

    /// General error, including a missing required key.
    GeneralError = 1,

    /// etcd could not be reached within the retry policy, or the endpoint is invalid.
    ///
    /// Only possible when retries are bounded with `--max-retries`.
    ConnectionError = 3,

    /// etcd answered, but not with a usable response.
    ///
    /// Scripts should check the namespace and API path rather than retry.
    ProtocolError = 5,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::HttpError(_)
            | ClientError::InvalidUrl(_)
            | ClientError::MaxRetriesExceeded(_) => ExitCode::ConnectionError,
            ClientError::ApiError { .. }
            | ClientError::InvalidResponse(_)
            | ClientError::NoResults
            | ClientError::InvalidRequest(_) => ExitCode::ProtocolError,
            ClientError::Cancelled => ExitCode::Interrupted,
        }
    }
}

impl From<&LoadError> for ExitCode {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::Remote(client) => client.into(),
            LoadError::MissingRequiredKey { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait to get an exit code from an anyhow::Error.
pub trait ExitCodeExt {
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        if let Some(err) = self.downcast_ref::<LoadError>() {
            return err.into();
        }
        if let Some(err) = self.downcast_ref::<ClientError>() {
            return err.into();
        }
        ExitCode::GeneralError
    }
}
