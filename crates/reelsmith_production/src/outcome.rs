//! Typed per-scene outcomes.

use derive_getters::Getters;
use reelsmith_core::{AssetPath, ProductionManifest};
use reelsmith_error::GenerationError;

/// Why a scene produced no asset.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum FailureCause {
    /// Image generation exhausted its retries
    #[display("image generation failed: {}", _0)]
    Image(GenerationError),
    /// Voice generation exhausted its retries
    #[display("voice generation failed: {}", _0)]
    Voice(GenerationError),
    /// Both generations exhausted their retries
    #[display("image generation failed: {}; voice generation failed: {}", image, voice)]
    Both {
        /// Last image error
        image: GenerationError,
        /// Last voice error
        voice: GenerationError,
    },
    /// The scene task panicked or was cancelled
    #[display("scene task aborted: {}", _0)]
    Aborted(String),
}

/// A scene that produced no asset, with its cause.
#[derive(Debug, Clone, PartialEq, Getters, derive_more::Display)]
#[display("scene {}: {}", scene_id, cause)]
pub struct SceneFailure {
    /// Failed scene
    scene_id: u32,
    /// What went wrong
    cause: FailureCause,
}

impl SceneFailure {
    /// Create a failure record.
    pub fn new(scene_id: u32, cause: FailureCause) -> Self {
        Self { scene_id, cause }
    }
}

/// Terminal state of one scene task.
pub type SceneOutcome = Result<AssetPath, SceneFailure>;

/// Result of a production run with at least one surviving scene.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ProductionReport {
    /// Surviving assets in ascending scene order
    manifest: ProductionManifest,
    /// Scenes that produced nothing, in ascending scene order
    failures: Vec<SceneFailure>,
}

impl ProductionReport {
    /// Create a report. Failures are sorted by scene id.
    pub fn new(manifest: ProductionManifest, mut failures: Vec<SceneFailure>) -> Self {
        failures.sort_by_key(|failure| failure.scene_id);
        Self { manifest, failures }
    }

    /// Whether every scene produced an asset.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Ids of scenes that failed.
    pub fn failed_scene_ids(&self) -> Vec<u32> {
        self.failures.iter().map(|failure| failure.scene_id).collect()
    }

    /// Hand the manifest on, dropping the failure list.
    pub fn into_manifest(self) -> ProductionManifest {
        self.manifest
    }
}
