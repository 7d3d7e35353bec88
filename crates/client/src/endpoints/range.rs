//! Range read endpoint.

use tracing::{debug, warn};

use super::endpoint_url;
use super::request::Transport;
use crate::error::{ClientError, Result};
use crate::models::{KeyValue, RangeRequest, RangeResponse};

/// Read every key under `namespace`.
///
/// # Errors
///
/// Returns `ClientError::NoResults` when the response has no `kvs` field and
/// `ClientError::InvalidResponse` when the body is not a range response.
/// Transport failures are retried according to the transport's policy.
pub async fn range(
    transport: &Transport,
    base_url: &str,
    api_path: &str,
    namespace: &str,
) -> Result<Vec<KeyValue>> {
    let url = endpoint_url(base_url, api_path, "kv/range");
    let body = serde_json::to_string(&RangeRequest::prefix(namespace))
        .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

    let bytes = transport.fetch(&url, &body).await?;
    let kvs = parse_range_response(&bytes)?;
    debug!(namespace, count = kvs.len(), "Range read complete");
    Ok(kvs)
}

/// Parse a complete range response body.
pub fn parse_range_response(body: &[u8]) -> Result<Vec<KeyValue>> {
    let response: RangeResponse = serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("range response: {e}")))?;

    let Some(kvs) = response.kvs else {
        warn!(
            body = %String::from_utf8_lossy(body),
            "No kvs found in range response"
        );
        return Err(ClientError::NoResults);
    };

    kvs.iter().map(|kv| kv.decode()).collect()
}
