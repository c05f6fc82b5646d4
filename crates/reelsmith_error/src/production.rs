//! Production error types.

/// Conditions that stop the producer from yielding a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProductionErrorKind {
    /// Blueprint violates its structural invariants
    #[display("Invalid blueprint: {}", _0)]
    InvalidBlueprint(String),
    /// Every scene failed; there is nothing to assemble
    #[display("No scenes produced: all {} scene tasks failed", attempted)]
    NoScenesProduced {
        /// Number of scene tasks that were launched
        attempted: usize,
    },
}

/// Error type for the production stage.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ProductionError, ProductionErrorKind};
///
/// let err = ProductionError::new(ProductionErrorKind::NoScenesProduced { attempted: 3 });
/// assert!(format!("{}", err).contains("all 3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Production Error: {} at line {} in {}", kind, line, file)]
pub struct ProductionError {
    /// The specific error condition
    pub kind: ProductionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ProductionError {
    /// Create a new ProductionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProductionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
