//! Bounded retry with linear backoff.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};

/// Retry policy: up to `max_attempts` invocations, sleeping
/// `base_delay × n` after the n-th failure.
///
/// Every error is retried. After the final attempt the policy returns that
/// attempt's error as-is, without sleeping again. Each attempt re-invokes the
/// operation from scratch, so operations that write files overwrite the same
/// destination (at-least-once).
///
/// # Examples
///
/// ```
/// use reelsmith_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_secs(2));
/// let delays: Vec<_> = policy.delays().collect();
/// assert_eq!(delays, vec![Duration::from_secs(2), Duration::from_secs(4)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Total invocations allowed, including the first
    max_attempts: u32,
    /// Delay unit for linear backoff
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Create a policy. A `max_attempts` of zero is treated as one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// A policy that invokes the operation exactly once.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Sleeps between attempts: `base_delay × 1`, `× 2`, up to `× (max_attempts − 1)`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let base = self.base_delay;
        (1..self.max_attempts).map(move |n| base * n)
    }

    /// Run `operation` under this policy.
    ///
    /// `label` names the operation in retry log lines.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt once all attempts have failed.
    pub async fn run<F, Fut, T, E>(&self, label: &str, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let attempt = AtomicU32::new(0);
        let max_attempts = self.max_attempts;

        Retry::spawn(self.delays(), || async {
            let current = attempt.fetch_add(1, Ordering::Relaxed) + 1;
            match operation().await {
                Ok(value) => {
                    if current > 1 {
                        debug!(operation = label, attempt = current, "Succeeded after retry");
                    }
                    Ok(value)
                }
                Err(err) => {
                    warn!(
                        operation = label,
                        attempt = current,
                        max_attempts,
                        error = %err,
                        "Attempt failed"
                    );
                    Err(RetryError::Transient {
                        err,
                        retry_after: None,
                    })
                }
            }
        })
        .await
    }

    /// Wrap `operation` so every call goes through this policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_rate_limit::RetryPolicy;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let calls = AtomicU32::new(0);
    /// let flaky = RetryPolicy::new(3, Duration::ZERO).wrap("flaky", || async {
    ///     match calls.fetch_add(1, Ordering::SeqCst) {
    ///         0 => Err("first call fails"),
    ///         n => Ok(n),
    ///     }
    /// });
    ///
    /// assert_eq!(flaky.call().await, Ok(1));
    /// # }
    /// ```
    pub fn wrap<F>(self, label: impl Into<String>, operation: F) -> Retrying<F> {
        Retrying {
            policy: self,
            label: label.into(),
            operation,
        }
    }
}

/// An operation bundled with the policy that retries it.
#[derive(Debug, Clone)]
pub struct Retrying<F> {
    policy: RetryPolicy,
    label: String,
    operation: F,
}

impl<F> Retrying<F> {
    /// Invoke the wrapped operation with retries.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error once the policy gives up.
    pub async fn call<Fut, T, E>(&self) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.policy.run(&self.label, &self.operation).await
    }

    /// The policy in use.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}
