//! Core data types for the reelsmith pipeline.
//!
//! A [`Blueprint`] of ordered [`Scene`]s flows into production, which yields a
//! [`ProductionManifest`] of [`AssetPath`]s; assembly turns that manifest into a
//! single [`VideoOutput`]. Every stage receives a [`TraceContext`] explicitly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod blueprint;
mod narration;
mod output;
mod scene;
mod trace;

pub use asset::{AssetPath, ProductionManifest};
pub use blueprint::Blueprint;
pub use narration::{NarrationConfig, NarrationConfigBuilder};
pub use output::VideoOutput;
pub use scene::{Scene, SceneBuilder, Section};
pub use trace::TraceContext;
