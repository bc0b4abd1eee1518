//! Bounded retry for requests.
//!
//! [`attempt`] runs an operation up to `max_tries` times, retrying only when
//! the error [is retryable](crate::TusError::is_retryable). The first success
//! is returned as soon as it happens; when every try fails, the last error is
//! returned.
//!
//! ```
//! use tus_client::client::{exponential_backoff, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(5);
//! assert_eq!(policy.max_tries, 5);
//!
//! assert_eq!(exponential_backoff(2, 100), Duration::from_millis(400));
//! ```

use crate::client::ClientConfig;
use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// How many times to try a request and how long to wait in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of tries, including the first
    pub max_tries: u32,
    /// Backoff base delay; 0 retries immediately
    pub base_delay_ms: u64,
    /// Log each failed try
    pub log: bool,
}

impl RetryPolicy {
    /// Immediate retries, logged
    pub fn new(max_tries: u32) -> Self {
        RetryPolicy {
            max_tries: max_tries.max(1),
            base_delay_ms: 0,
            log: true,
        }
    }

    /// Derive the policy from client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        RetryPolicy {
            max_tries: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms,
            log: config.enable_logging,
        }
    }
}

/// Exponential backoff delay calculation
pub fn exponential_backoff(attempt: u32, base_ms: u64) -> Duration {
    let delay_ms = base_ms.saturating_mul(2_u64.pow(attempt.min(10)));
    Duration::from_millis(delay_ms)
}

/// Run `op` until it succeeds, fails with a non-retryable error, or
/// `policy.max_tries` tries have been made.
///
/// `op` receives the zero-based try number.
pub async fn attempt<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_tries = policy.max_tries.max(1);
    let mut tries = 0;
    loop {
        match op(tries).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && tries + 1 < max_tries => {
                let delay = exponential_backoff(tries, policy.base_delay_ms);
                if policy.log {
                    tracing::warn!(
                        "Request failed (attempt {}/{}), retrying after {:?}: {}",
                        tries + 1,
                        max_tries,
                        delay,
                        e
                    );
                }
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                tries += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
