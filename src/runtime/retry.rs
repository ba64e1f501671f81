//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use crate::domain::{Result, YamiyumeError};

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero behaves like one.
    pub max_attempts: u32,
    /// Delay after the first failure; doubled after each further one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after failed attempt `attempt` (1-based).
    ///
    /// ```
    /// use std::time::Duration;
    /// use yamiyume::runtime::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_after(1), Duration::from_millis(500));
    /// assert_eq!(policy.delay_after(3), Duration::from_millis(2000));
    /// ```
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

/// Runs `op` until it succeeds, fails permanently or runs out of attempts.
///
/// `op` receives the 1-based attempt number. Only errors for which
/// [`YamiyumeError::is_transient`] holds are retried. `is_superseded` is
/// checked after every backoff sleep; when it reports `true` the loop stops
/// with [`YamiyumeError::Superseded`] instead of issuing another request.
///
/// # Errors
///
/// Returns the last error from `op`, or `Superseded`.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    is_superseded: impl Fn() -> bool,
    mut op: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt < max_attempts && e.is_transient() => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(attempt, max_attempts, delay_ms = delay.as_millis(), error = %e, "attempt failed, backing off");
                tokio::time::sleep(delay).await;
                if is_superseded() {
                    tracing::debug!(attempt, "superseded while backing off");
                    return Err(YamiyumeError::Superseded);
                }
                attempt += 1;
            }
            Err(e) => {
                tracing::debug!(attempt, transient = e.is_transient(), error = %e, "giving up");
                return Err(e);
            }
        }
    }
}
