//! Assembly error types.

/// Conditions that abort assembly of the final output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AssemblyErrorKind {
    /// Assembly was invoked with zero assets
    #[display("Manifest contains no assets")]
    EmptyManifest,
    /// Every clip failed to compose
    #[display("No composable clips: all {} assets failed composition", attempted)]
    NoComposableClips {
        /// Number of assets that were attempted
        attempted: usize,
    },
    /// Concatenation or encoding of the timeline failed
    #[display("Failed to encode output: {}", _0)]
    Encode(String),
    /// Filesystem failure around the output file
    #[display("Output I/O failed: {}", _0)]
    Io(String),
    /// The render worker could not run the job
    #[display("Render worker failed: {}", _0)]
    WorkerFailed(String),
}

/// Error type for the assembly stage.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{AssemblyError, AssemblyErrorKind};
///
/// let err = AssemblyError::new(AssemblyErrorKind::EmptyManifest);
/// assert!(format!("{}", err).contains("no assets"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Assembly Error: {} at line {} in {}", kind, line, file)]
pub struct AssemblyError {
    /// The specific error condition
    pub kind: AssemblyErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl AssemblyError {
    /// Create a new AssemblyError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AssemblyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for assembly operations.
pub type AssemblyResult<T> = std::result::Result<T, AssemblyError>;
