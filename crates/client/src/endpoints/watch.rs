//! Watch endpoint.
//!
//! Responsibilities:
//! - Open a streaming `watch` request for a namespace and decode its frames.
//! - Reopen the identical request when the connection fails or the server
//!   closes it. Under an unbounded retry policy the stream never ends on its own.
//!
//! Does NOT handle:
//! - Reacting to events (see the aggregator's watcher).
//!
//! Invariants:
//! - Only frames with at least one event are yielded; `created` and progress
//!   frames are dropped silently.
//! - A protocol error is yielded once and ends the stream.
//! - Cancellation ends the stream with `ClientError::Cancelled`.
//! - Dropped connections count against the retry limit until a frame arrives.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use tracing::{debug, warn};

use super::endpoint_url;
use super::frame::FrameDecoder;
use super::request::Transport;
use crate::error::{ClientError, Result};
use crate::models::{WatchCreateRequest, WatchFrame, WatchResponse};

type BodyStream = BoxStream<'static, reqwest::Result<Bytes>>;

/// Open-ended stream of change notifications for one namespace.
pub struct WatchStream {
    inner: BoxStream<'static, Result<WatchResponse>>,
}

impl std::fmt::Debug for WatchStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchStream").finish_non_exhaustive()
    }
}

impl Stream for WatchStream {
    type Item = Result<WatchResponse>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

/// Watch every key under `namespace`.
///
/// Nothing is sent until the stream is first polled.
pub fn watch(transport: Transport, base_url: &str, api_path: &str, namespace: &str) -> WatchStream {
    let url = endpoint_url(base_url, api_path, "watch");
    let body = serde_json::to_string(&WatchCreateRequest::prefix(namespace))
        .map_err(|e| ClientError::InvalidRequest(e.to_string()));

    let state = match body {
        Ok(body) => WatchState::new(transport, url, body),
        Err(err) => {
            return WatchStream {
                inner: stream::once(async move { Err(err) }).boxed(),
            };
        }
    };

    WatchStream {
        inner: stream::unfold(state, next_response).boxed(),
    }
}

struct WatchState {
    transport: Transport,
    url: String,
    body: String,
    connection: Option<BodyStream>,
    decoder: FrameDecoder,
    pending: VecDeque<Result<WatchResponse>>,
    /// Transport failures since the last frame was received.
    failures: usize,
    finished: bool,
}

impl WatchState {
    fn new(transport: Transport, url: String, body: String) -> Self {
        Self {
            transport,
            url,
            body,
            connection: None,
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            failures: 0,
            finished: false,
        }
    }

    /// Open a connection. The returned future owns its inputs so the state
    /// is not borrowed across the request.
    fn connect(&self) -> impl Future<Output = Result<BodyStream>> + Send + 'static {
        let transport = self.transport.clone();
        let url = self.url.clone();
        let body = self.body.clone();
        let failures = self.failures;
        async move {
            let response = transport.send_after_failures(&url, &body, failures).await?;
            debug!(url = %url, "Watch connection open");
            Ok(response.bytes_stream().boxed())
        }
    }

    fn decode(&mut self, chunk: &[u8]) {
        for frame in self.decoder.push(chunk) {
            let decoded = frame.and_then(|value| {
                serde_json::from_value::<WatchFrame>(value)
                    .map_err(|e| ClientError::InvalidResponse(format!("watch frame: {e}")))
            });
            let frame = match decoded {
                Ok(frame) => frame,
                Err(err) => {
                    self.pending.push_back(Err(err));
                    return;
                }
            };
            self.failures = 0;
            if let Some(error) = &frame.error {
                warn!(error = %error, "Watch stream reported an error frame");
            }
            match frame.into_response() {
                Some(response) => self.pending.push_back(Ok(response)),
                None => debug!("Dropping watch frame without events"),
            }
        }
    }

    /// Forget the current connection and wait before the next one. A
    /// dropped connection counts as one transport failure.
    fn reconnect_after_delay(&mut self) -> impl Future<Output = Result<()>> + Send + 'static {
        self.connection = None;
        self.decoder.reset();
        self.failures += 1;
        let transport = self.transport.clone();
        let failures = self.failures;
        async move { transport.retry_after(failures).await }
    }
}

async fn next_response(mut state: WatchState) -> Option<(Result<WatchResponse>, WatchState)> {
    loop {
        if state.finished {
            return None;
        }
        if let Some(item) = state.pending.pop_front() {
            if item.is_err() {
                state.finished = true;
            }
            return Some((item, state));
        }

        let mut connection = match state.connection.take() {
            Some(connection) => connection,
            None => match state.connect().await {
                Ok(connection) => connection,
                Err(err) => {
                    state.finished = true;
                    return Some((Err(err), state));
                }
            },
        };

        let next = tokio::select! {
            biased;
            _ = state.transport.cancellation().cancelled() => None,
            next = connection.next() => Some(next),
        };
        let Some(next) = next else {
            state.finished = true;
            return Some((Err(ClientError::Cancelled), state));
        };

        let outcome = match next {
            Some(Ok(chunk)) => {
                state.connection = Some(connection);
                state.decode(&chunk);
                continue;
            }
            Some(Err(err)) => {
                warn!(url = %state.url, error = %err, "Watch connection failed, will reconnect");
                state.reconnect_after_delay().await
            }
            None => {
                debug!(url = %state.url, "Watch connection closed by server, will reconnect");
                state.reconnect_after_delay().await
            }
        };

        if let Err(err) = outcome {
            state.finished = true;
            return Some((Err(err), state));
        }
    }
}
