//! reelsmith - concurrent scene asset generation and video assembly
//!
//! reelsmith turns a [`Blueprint`] (an ordered list of narrated scenes) into
//! a single video. Production generates one image and one narration track
//! per scene concurrently, retrying transient failures and isolating scenes
//! that still fail. Assembly renders the surviving scenes in order and
//! encodes them into one file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reelsmith::{Blueprint, Pipeline, ReelsmithConfig, TraceContext};
//!
//! # async fn run(blueprint: Blueprint) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReelsmithConfig::load()?;
//! let pipeline = Pipeline::from_config(&config)?;
//! let output = pipeline
//!     .run(&blueprint, config.narration(), &TraceContext::new())
//!     .await?;
//! println!("{} ({:.1}s)", output.file_path().display(), output.duration());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `reelsmith_error` - Error types
//! - `reelsmith_core` - Blueprint, manifest and output records
//! - `reelsmith_interface` - Image and voice backend traits
//! - `reelsmith_rate_limit` - Retry policy and rate limiting
//! - `reelsmith_storage` - Asset and output directory layout
//! - `reelsmith_models` - OpenAI and mock backends
//! - `reelsmith_production` - Concurrent scene production
//! - `reelsmith_assembly` - Clip rendering and final encode
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod pipeline;
pub mod telemetry;

pub use config::{LogFormat, LoggingConfig, PathsConfig, ProductionConfig, ReelsmithConfig};
pub use pipeline::Pipeline;

pub use reelsmith_assembly::{
    Assembler, AssemblerBuilder, ClipRenderer, FfmpegRenderer, RenderSpec, RenderWorker,
    SceneClip, is_ffmpeg_on_path,
};
pub use reelsmith_core::{
    AssetPath, Blueprint, NarrationConfig, NarrationConfigBuilder, ProductionManifest, Scene,
    SceneBuilder, Section, TraceContext, VideoOutput,
};
pub use reelsmith_error::{
    AssemblyError, AssemblyErrorKind, AssemblyResult, BuilderError, BuilderErrorKind,
    CompositionError, CompositionErrorKind, CompositionResult, ConfigError, GenerationError,
    GenerationErrorKind, GenerationResult, ProductionError, ProductionErrorKind, ReelsmithError,
    ReelsmithErrorKind, ReelsmithResult, StorageError, StorageErrorKind, StorageResult,
};
pub use reelsmith_interface::{ImageGenerator, VoiceSynthesizer};
pub use reelsmith_models::{
    MockImageGenerator, MockVoiceSynthesizer, OpenAiImageGenerator, OpenAiVoiceSynthesizer,
    ProviderFactory, ProviderKind, ProviderSettings,
};
pub use reelsmith_production::{
    ContentProducer, ContentProducerBuilder, FailureCause, ProductionReport, SceneFailure,
    SceneOutcome,
};
pub use reelsmith_rate_limit::{RateLimitConfig, RateLimiter, RetryConfig, RetryPolicy, Throttled};
pub use reelsmith_storage::{AssetLayout, OutputLayout, TopicDirs};
