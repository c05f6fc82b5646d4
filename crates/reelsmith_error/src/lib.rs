//! Error types for the reelsmith pipeline.
//!
//! Every domain follows the same `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! The domain errors convert into [`ReelsmithError`] through `?`, so callers
//! that only need to surface a failure can work with [`ReelsmithResult`], while
//! callers that must keep the original failure (the retry wrapper re-raising the
//! last [`GenerationError`]) use the domain result aliases.
//!
//! # Examples
//!
//! ```
//! use reelsmith_error::{AssemblyError, AssemblyErrorKind, ReelsmithResult};
//!
//! fn assemble(assets: usize) -> ReelsmithResult<()> {
//!     if assets == 0 {
//!         Err(AssemblyError::new(AssemblyErrorKind::EmptyManifest))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(assemble(0).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod builder;
mod composition;
mod config;
mod error;
mod generation;
mod production;
mod storage;

pub use assembly::{AssemblyError, AssemblyErrorKind, AssemblyResult};
pub use builder::{BuilderError, BuilderErrorKind};
pub use composition::{CompositionError, CompositionErrorKind, CompositionResult};
pub use config::ConfigError;
pub use error::{ReelsmithError, ReelsmithErrorKind, ReelsmithResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use production::{ProductionError, ProductionErrorKind};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
