//! Request throttling using governor and a Tokio semaphore.
//!
//! Requests per minute go through governor's GCRA limiter; in-flight requests
//! are capped by a semaphore whose permit lives in the returned guard.

use crate::RateLimitConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Throttle shared by every call to one backend.
///
/// Cloning is cheap; clones share the same quotas.
///
/// # Examples
///
/// ```
/// use reelsmith_rate_limit::{RateLimitConfig, RateLimiter};
///
/// let limiter = RateLimiter::new(&RateLimitConfig::new(Some(60), Some(2)));
/// assert_eq!(limiter.available_slots(), 2);
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Option<Arc<Semaphore>>,
}

impl RateLimiter {
    /// Create a limiter. Unset or zero limits are not enforced.
    pub fn new(config: &RateLimitConfig) -> Self {
        let rpm_limiter = config
            .requests_per_minute()
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        let concurrent_semaphore = config
            .max_concurrent()
            .filter(|n| *n > 0)
            .map(|n| Arc::new(Semaphore::new(n as usize)));

        Self {
            rpm_limiter,
            concurrent_semaphore,
        }
    }

    /// A limiter that never waits.
    pub fn unlimited() -> Self {
        Self {
            rpm_limiter: None,
            concurrent_semaphore: None,
        }
    }

    /// Wait until a request may start.
    ///
    /// The returned guard holds the concurrency slot until dropped.
    pub async fn acquire(&self) -> RateLimiterGuard {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        // Concurrency slot last, so no slot is held while waiting on quota.
        let permit = match &self.concurrent_semaphore {
            Some(semaphore) => semaphore.clone().acquire_owned().await.ok(),
            None => None,
        };

        RateLimiterGuard { _permit: permit }
    }

    /// Remaining concurrency slots, or `usize::MAX` when unbounded.
    pub fn available_slots(&self) -> usize {
        self.concurrent_semaphore
            .as_ref()
            .map_or(usize::MAX, |semaphore| semaphore.available_permits())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("rpm_limited", &self.rpm_limiter.is_some())
            .field("available_slots", &self.available_slots())
            .finish()
    }
}

/// RAII guard releasing the concurrency slot on drop.
#[derive(Debug)]
pub struct RateLimiterGuard {
    _permit: Option<OwnedSemaphorePermit>,
}
