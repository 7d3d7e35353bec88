//! Change watching.
//!
//! Responsibilities:
//! - Subscribe to the remote namespace and run a full aggregation pass for
//!   every watch frame that carries events.
//! - Deliver each pass's result to the caller's callback.
//!
//! Does NOT handle:
//! - Reconnecting dropped watch connections (the client's watch stream does).
//! - Merging change events into the previous mapping. Every event triggers a
//!   complete reload.
//!
//! Invariants:
//! - Without a remote namespace no task is spawned and the callback never runs.
//! - Reloads run one at a time, in the order their frames arrived.
//! - A fatal result is delivered to the callback and then the watch stops.

use futures::StreamExt;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wrangler_client::ClientError;

use crate::aggregator::{ConfigWrangler, FoundVars};
use crate::error::Result;

/// Handle to a running watch task.
///
/// Dropping the handle detaches the task; it keeps running until cancelled
/// or until the watch ends.
#[derive(Debug)]
pub struct WatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Stop watching. The callback is not invoked again once the task
    /// observes the cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the watch task to end.
    pub async fn join(self) -> std::result::Result<(), JoinError> {
        self.task.await
    }
}

impl ConfigWrangler {
    /// Reload the configuration whenever the remote namespace changes.
    ///
    /// Returns `None` without spawning anything when the descriptor has no
    /// remote namespace. Otherwise the watch runs on a background tokio task,
    /// so this must be called from within a tokio runtime.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let handle = wrangler.watch(|result| match result {
    ///     Ok(vars) => apply(vars),
    ///     Err(err) => tracing::error!(error = %err, "Reload failed"),
    /// });
    /// ```
    pub fn watch<F>(&self, callback: F) -> Option<WatchHandle>
    where
        F: FnMut(Result<FoundVars>) + Send + 'static,
    {
        let client = self.client()?;
        let namespace = self.descriptor().etcd_namespace()?;

        let stream = client.watch(namespace);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_watch(
            self.clone(),
            stream,
            cancel.clone(),
            callback,
        ));

        info!(namespace, "Watching remote namespace for changes");
        Some(WatchHandle { cancel, task })
    }
}

async fn run_watch<F>(
    wrangler: ConfigWrangler,
    mut stream: wrangler_client::WatchStream,
    cancel: CancellationToken,
    mut callback: F,
) where
    F: FnMut(Result<FoundVars>) + Send + 'static,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            next = stream.next() => Some(next),
        };
        let Some(next) = next else {
            break;
        };

        let response = match next {
            Some(Ok(response)) => response,
            Some(Err(ClientError::Cancelled)) => {
                debug!("Watch stream cancelled");
                break;
            }
            Some(Err(err)) => {
                warn!(error = %err, "Watch stream failed");
                callback(Err(err.into()));
                break;
            }
            None => break,
        };

        info!(events = response.events.len(), "Remote change detected, reloading");
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = wrangler.load() => Some(result),
        };
        let Some(result) = result else {
            break;
        };

        let fatal = matches!(&result, Err(err) if err.is_fatal());
        callback(result);
        if fatal {
            warn!("Required configuration missing after reload, watch stopped");
            break;
        }
    }
    debug!("Watch task finished");
}
