//! Assembly of produced assets into one video.
//!
//! The [`Assembler`] takes a [`ProductionManifest`](reelsmith_core::ProductionManifest),
//! renders one clip per asset in ascending scene order through a
//! [`ClipRenderer`], skips clips that fail to compose, and concatenates the
//! rest into the final file. All render work runs on a [`RenderWorker`]: a
//! single slot on the blocking pool, away from the async generation workload.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod ffmpeg;
mod renderer;
mod spec;
mod worker;

pub use assembler::{Assembler, AssemblerBuilder};
pub use ffmpeg::{FfmpegRenderer, is_ffmpeg_on_path};
pub use renderer::{ClipRenderer, SceneClip};
pub use spec::RenderSpec;
pub use worker::RenderWorker;
