//! Error types for the etcd client.
//!
//! Two failure classes matter to callers. Transport failures (the store could
//! not be reached, or the connection dropped) are retried inside the client
//! and only become visible when a bounded [`RetryPolicy`](crate::RetryPolicy)
//! runs out. Protocol failures (bad status, malformed or incomplete bodies)
//! are returned once and never retried.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during etcd client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success status from the gateway.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body was not the expected JSON shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Range response carried no `kvs` field.
    #[error("No results found")]
    NoResults,

    /// Request body could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// The operation was cancelled through its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Check if this error is a transport failure.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::HttpError(e) => is_transport_error(e),
            _ => false,
        }
    }

    /// Check if this error is a protocol failure: the store answered, but not
    /// with something usable.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::InvalidResponse(_) | Self::NoResults
        )
    }
}

/// True for reqwest failures that happen on the wire rather than in the
/// request builder or response decoding.
pub(crate) fn is_transport_error(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request() || err.is_body()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_errors() {
        assert!(ClientError::NoResults.is_protocol());
        assert!(ClientError::InvalidResponse("x".to_string()).is_protocol());
        assert!(
            ClientError::ApiError {
                status: 404,
                url: "http://localhost:2379/v3alpha/kv/range".to_string(),
                message: "not found".to_string(),
            }
            .is_protocol()
        );
        assert!(!ClientError::Cancelled.is_protocol());
        assert!(!ClientError::MaxRetriesExceeded(3).is_protocol());
    }

    #[test]
    fn test_non_http_errors_are_not_transport() {
        assert!(!ClientError::NoResults.is_transport());
        assert!(!ClientError::Cancelled.is_transport());
    }

    #[test]
    fn test_no_results_message() {
        assert_eq!(ClientError::NoResults.to_string(), "No results found");
    }
}
