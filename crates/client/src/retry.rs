//! Retry policy for transport failures.
//!
//! Invariants:
//! - The delay between attempts is constant; there is no backoff growth.
//! - With no attempt limit (the default) a transport failure is never
//!   surfaced to the caller.

use std::time::Duration;

use wrangler_config::constants::DEFAULT_RETRY_DELAY_MS;

/// How transport failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    delay: Duration,
    max_attempts: Option<usize>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Retry forever after the default 3 s delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixed delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Cap the total number of attempts (first try included).
    ///
    /// `0` is treated as `1`: the request is always sent at least once.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }

    /// Remove any attempt cap.
    pub fn unbounded(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }

    /// Whether another attempt is allowed after `attempts_made` failures.
    pub fn allows_retry(&self, attempts_made: usize) -> bool {
        self.max_attempts.is_none_or(|max| attempts_made < max)
    }
}
