//! Retry and rate limit configuration sections.

use crate::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[retry]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per generation call
    max_attempts: u32,
    /// Backoff unit in milliseconds
    base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    /// Create a retry section.
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
        }
    }

    /// Build the policy this section describes.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

/// `[rate_limit]` section. Absent values mean unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    requests_per_minute: Option<u32>,
    max_concurrent: Option<u32>,
}

impl RateLimitConfig {
    /// Create a rate limit section.
    pub fn new(requests_per_minute: Option<u32>, max_concurrent: Option<u32>) -> Self {
        Self {
            requests_per_minute,
            max_concurrent,
        }
    }

    /// Requests per minute per backend.
    pub fn requests_per_minute(&self) -> Option<u32> {
        self.requests_per_minute
    }

    /// In-flight requests per backend.
    pub fn max_concurrent(&self) -> Option<u32> {
        self.max_concurrent
    }

    /// Whether any limit is configured.
    pub fn is_enabled(&self) -> bool {
        self.requests_per_minute.is_some_and(|n| n > 0)
            || self.max_concurrent.is_some_and(|n| n > 0)
    }
}
