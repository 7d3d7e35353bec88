//! Retrying POST transport for the gateway.
//!
//! Every request is a JSON body posted with the form content type the
//! gateway has always been called with. A transport failure (no response
//! was received, or the body could not be read) waits the policy's fixed
//! delay and resends the identical request. Non-success statuses are
//! protocol errors and return immediately.

use bytes::Bytes;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Response};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{ClientError, Result, is_transport_error};
use crate::retry::RetryPolicy;

/// Content type sent with every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP client plus the retry and cancellation rules applied to every call.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    retry: RetryPolicy,
    cancel: CancellationToken,
}

impl Transport {
    pub fn new(http: Client, retry: RetryPolicy, cancel: CancellationToken) -> Self {
        Self {
            http,
            retry,
            cancel,
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Post `body` to `url` until a response with a success status arrives.
    pub async fn send(&self, url: &str, body: &str) -> Result<Response> {
        self.send_after_failures(url, body, 0).await
    }

    /// Like [`Transport::send`], counting `failures` earlier transport
    /// failures of the same logical request against the attempt limit.
    pub async fn send_after_failures(
        &self,
        url: &str,
        body: &str,
        failures: usize,
    ) -> Result<Response> {
        let mut attempt = failures;
        loop {
            attempt += 1;
            match self.post_once(url, body).await? {
                Ok(response) => {
                    if attempt > 1 {
                        debug!(attempt, url, "Request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(err) => self.backoff(attempt, url, &err).await?,
            }
        }
    }

    /// Like [`Transport::send`], but also reads the whole body, retrying the
    /// request if the connection drops mid-body.
    pub async fn fetch(&self, url: &str, body: &str) -> Result<Bytes> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match self.post_once(url, body).await? {
                Ok(response) => match response.bytes().await {
                    Ok(bytes) => return Ok(bytes),
                    Err(err) if is_transport_error(&err) => err,
                    Err(err) => return Err(err.into()),
                },
                Err(err) => err,
            };
            self.backoff(attempt, url, &err).await?;
        }
    }

    /// After `attempts` failed attempts, wait out the retry delay before the
    /// next one. Fails with `MaxRetriesExceeded` once the policy's limit is
    /// reached.
    pub async fn retry_after(&self, attempts: usize) -> Result<()> {
        if !self.retry.allows_retry(attempts) {
            debug!(attempts, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded(attempts));
        }
        self.pause().await
    }

    /// Wait out the retry delay, or return early if cancelled.
    pub async fn pause(&self) -> Result<()> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ClientError::Cancelled),
            _ = tokio::time::sleep(self.retry.delay()) => Ok(()),
        }
    }

    /// One attempt. The outer result carries errors that end the call; the
    /// inner one carries transport failures that may be retried.
    async fn post_once(
        &self,
        url: &str,
        body: &str,
    ) -> Result<std::result::Result<Response, reqwest::Error>> {
        if self.cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(CONTENT_LENGTH, body.len())
            .body(body.to_owned());

        debug!(url, bytes = body.len(), "Posting to etcd gateway");

        let sent = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
            sent = request.send() => sent,
        };

        match sent {
            Ok(response) if response.status().is_success() => Ok(Ok(response)),
            Ok(response) => Err(api_error(response).await),
            Err(err) if is_transport_error(&err) => Ok(Err(err)),
            Err(err) => Err(err.into()),
        }
    }

    async fn backoff(&self, attempt: usize, url: &str, err: &reqwest::Error) -> Result<()> {
        if !self.retry.allows_retry(attempt) {
            debug!(attempts = attempt, url, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded(attempt));
        }
        warn!(
            attempt,
            url,
            delay_ms = self.retry.delay().as_millis() as u64,
            error = %err,
            "etcd request failed, will retry"
        );
        self.pause().await
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    ClientError::ApiError {
        status,
        url,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_pause_waits_for_delay() {
        let transport = Transport::new(
            Client::new(),
            RetryPolicy::new().with_delay(Duration::from_secs(3)),
            CancellationToken::new(),
        );
        let start = tokio::time::Instant::now();
        transport.pause().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_pause_is_cancellable() {
        let cancel = CancellationToken::new();
        let transport = Transport::new(Client::new(), RetryPolicy::new(), cancel.clone());
        cancel.cancel();
        assert!(matches!(transport.pause().await, Err(ClientError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancelled_transport_sends_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let transport = Transport::new(Client::new(), RetryPolicy::new(), cancel);
        let result = transport.send("http://127.0.0.1:9/v3alpha/kv/range", "{}").await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }
}
