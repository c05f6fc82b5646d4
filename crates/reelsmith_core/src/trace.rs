//! Trace context passed through every pipeline call.

use serde::{Deserialize, Serialize};

/// Carries the trace identifier for one pipeline run.
///
/// Passed explicitly to each stage and recorded as a span field, so
/// overlapping runs in one process keep their logs apart.
///
/// # Examples
///
/// ```
/// use reelsmith_core::TraceContext;
///
/// let ctx = TraceContext::with_id("job-42");
/// assert_eq!(ctx.trace_id(), "job-42");
/// assert_ne!(TraceContext::new().trace_id(), TraceContext::new().trace_id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", trace_id)]
pub struct TraceContext {
    trace_id: String,
}

impl TraceContext {
    /// Create a context with a fresh random trace id.
    pub fn new() -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Create a context with a caller-supplied trace id.
    pub fn with_id(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
        }
    }

    /// The trace identifier.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}
