//! Generation error types.
//!
//! Raised by image and voice backends. The kinds describe what went wrong for
//! the log line; they deliberately carry no retry classification, every
//! generation failure is treated the same by the retry policy.

/// Specific error conditions for an external generation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport-level failure talking to the provider
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("Provider returned status {}: {}", status, message)]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },
    /// Provider answered, but the payload was not usable
    #[display("Invalid provider response: {}", _0)]
    InvalidResponse(String),
    /// Writing the generated asset to its destination failed
    #[display("Failed to write asset: {}", _0)]
    Io(String),
    /// Producing the media bytes failed locally
    #[display("Failed to encode asset: {}", _0)]
    Encoding(String),
    /// Backend is not usable in this process (missing key, closed limiter)
    #[display("Generation backend unavailable: {}", _0)]
    Unavailable(String),
}

/// Error type for image and voice generation calls.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Provider {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for generation calls.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
