//! Composition error types.
//!
//! A composition error concerns exactly one scene's clip. The assembler
//! recovers from it by skipping that clip.

/// Reasons a single clip could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CompositionErrorKind {
    /// Image could not be read or decoded
    #[display("Failed to decode image: {}", _0)]
    ImageDecode(String),
    /// Audio track could not be read or measured
    #[display("Failed to probe audio: {}", _0)]
    AudioProbe(String),
    /// The renderer failed while producing the clip
    #[display("Failed to render clip: {}", _0)]
    Render(String),
}

/// Error type for one scene's clip composition.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{CompositionError, CompositionErrorKind};
///
/// let err = CompositionError::new(2, CompositionErrorKind::ImageDecode("truncated".into()));
/// assert_eq!(err.scene_id, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Composition Error (scene {}): {} at line {} in {}", scene_id, kind, line, file)]
pub struct CompositionError {
    /// Scene whose clip failed
    pub scene_id: u32,
    /// The specific error condition
    pub kind: CompositionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CompositionError {
    /// Create a new CompositionError with automatic location tracking.
    #[track_caller]
    pub fn new(scene_id: u32, kind: CompositionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            scene_id,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for clip composition.
pub type CompositionResult<T> = std::result::Result<T, CompositionError>;
