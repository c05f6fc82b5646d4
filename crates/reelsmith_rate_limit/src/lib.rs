//! Retry and throttling for generation calls.
//!
//! [`RetryPolicy`] is the bounded-retry decorator: it wraps any fallible async
//! operation, retries every failure with linear backoff, and hands back the
//! last failure unchanged once attempts run out.
//!
//! [`RateLimiter`] is an optional knob layered on top of the backends
//! (requests per minute through governor, concurrency through a Tokio
//! semaphore). [`Throttled`] applies it to any image or voice backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod limiter;
mod retry;
mod throttled;

pub use config::{RateLimitConfig, RetryConfig};
pub use limiter::{RateLimiter, RateLimiterGuard};
pub use retry::{Retrying, RetryPolicy};
pub use throttled::Throttled;
