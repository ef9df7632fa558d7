//! Exponential backoff retry for transient platform failures.
//!
//! Operations go over the public internet; timeouts and brief platform
//! outages are expected. This module retries only errors
//! [`SdkError::is_transient`] classifies as worth retrying; validation
//! and serialization failures surface immediately.

use std::time::Duration;

use crate::error::{Result, SdkError};

/// Configuration for retry behavior.
///
/// The delay between attempts grows exponentially up to `max_delay`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recotag::api::RetryPolicy;
///
/// // Default policy: 3 attempts, 100ms initial delay, 5s max delay
/// let policy = RetryPolicy::default();
///
/// let aggressive = RetryPolicy {
///     max_attempts: 5,
///     initial_delay: Duration::from_millis(50),
///     max_delay: Duration::from_secs(10),
///     backoff_multiplier: 2.0,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (default: 3).
    pub max_attempts: u32,
    /// Delay before the second attempt (default: 100ms).
    pub initial_delay: Duration,
    /// Ceiling on the delay between attempts (default: 5s).
    pub max_delay: Duration,
    /// Multiplier applied per attempt (default: 2.0).
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy that never retries, for callers handling retries themselves.
    #[must_use]
    pub fn no_retries() -> Self {
        Self { max_attempts: 1, ..Self::default() }
    }

    /// Delay before attempt `attempt + 1`, capped at `max_delay`.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "delays are small positive millisecond counts"
        )]
        let delay_ms = (self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt.try_into().unwrap_or(i32::MAX)))
            as u64;
        Duration::from_millis(delay_ms).min(self.max_delay)
    }
}

/// Executes an operation, retrying transient failures with backoff.
///
/// Non-transient errors return immediately; transient ones retry up to
/// `policy.max_attempts` total attempts.
///
/// # Errors
///
/// Returns the last error when attempts are exhausted, or the first
/// non-transient error encountered.
pub async fn retry_with_backoff<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 0..policy.max_attempts.max(1) {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) if error.is_transient() => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    error = %error,
                    "transient failure, will retry"
                );
                last_error = Some(error);

                // No sleep after the final attempt.
                if attempt + 1 < policy.max_attempts {
                    let delay = policy.delay_for_attempt(attempt);
                    tracing::debug!(delay_ms = delay.as_millis(), "sleeping before retry");
                    tokio::time::sleep(delay).await;
                }
            }
            Err(error) => return Err(error),
        }
    }

    Err(last_error.unwrap_or_else(|| SdkError::ApiError {
        status: 0,
        message: "retry loop made no attempts".to_owned(),
    }))
}
