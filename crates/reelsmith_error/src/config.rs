//! Configuration error types.
//!
//! Raised while loading `reelsmith.toml` layers, validating render and retry
//! settings, or building backends from provider settings.

use std::fmt;

/// A setting the pipeline cannot run with.
///
/// `key` names the offending setting in `section.field` form when the error
/// is about one value, e.g. `render.fps`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error)]
pub struct ConfigError {
    /// Offending setting, when the error concerns a single value
    pub key: Option<String>,
    /// What went wrong
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// An error not tied to one setting, such as an unreadable file.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse configuration: expected table");
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            key: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// An invalid value for `key`. The message starts with the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("retry.max_attempts", "must be at least 1");
    /// assert_eq!(err.key.as_deref(), Some("retry.max_attempts"));
    /// assert_eq!(err.message, "retry.max_attempts must be at least 1");
    /// ```
    #[track_caller]
    pub fn invalid(key: impl Into<String>, detail: impl fmt::Display) -> Self {
        let key = key.into();
        let mut err = Self::new(format!("{} {}", key, detail));
        err.key = Some(key);
        err
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "Invalid setting '{}': {}", key, self.message)?,
            None => write!(f, "Configuration Error: {}", self.message)?,
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
