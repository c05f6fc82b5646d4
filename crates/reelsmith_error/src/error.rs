//! Top-level error wrapper types.

use crate::{
    AssemblyError, BuilderError, CompositionError, ConfigError, GenerationError, ProductionError,
    StorageError,
};

/// Every failure the pipeline can surface to a caller.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithError, ReelsmithErrorKind, ConfigError};
///
/// let err: ReelsmithError = ConfigError::new("fps must be non-zero").into();
/// assert!(matches!(err.kind(), ReelsmithErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelsmithErrorKind {
    /// External generation call failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Production could not yield a manifest
    #[from(ProductionError)]
    Production(ProductionError),
    /// A single clip could not be composed
    #[from(CompositionError)]
    Composition(CompositionError),
    /// Assembly of the final output failed
    #[from(AssemblyError)]
    Assembly(AssemblyError),
    /// Filesystem layout error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// reelsmith error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelsmith Error: {}", _0)]
pub struct ReelsmithError(Box<ReelsmithErrorKind>);

impl ReelsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelsmithErrorKind {
        &self.0
    }

    /// Consume the error and return its kind.
    pub fn into_kind(self) -> ReelsmithErrorKind {
        *self.0
    }
}

impl<T> From<T> for ReelsmithError
where
    T: Into<ReelsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for reelsmith operations.
pub type ReelsmithResult<T> = std::result::Result<T, ReelsmithError>;
