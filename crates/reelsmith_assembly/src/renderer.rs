//! Renderer seam between the assembler and the media toolchain.

use crate::RenderSpec;
use reelsmith_core::AssetPath;
use reelsmith_error::{AssemblyResult, CompositionResult};
use std::path::{Path, PathBuf};

/// One composed scene clip on disk.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct SceneClip {
    /// Scene the clip was built from
    scene_id: u32,
    /// Rendered clip file
    path: PathBuf,
    /// Duration reported for the source asset
    asset_duration: f64,
}

impl SceneClip {
    /// Create a clip record.
    pub fn new(scene_id: u32, path: impl Into<PathBuf>, asset_duration: f64) -> Self {
        Self {
            scene_id,
            path: path.into(),
            asset_duration,
        }
    }
}

/// Blocking media operations run on the render worker.
///
/// Implementations are called from a blocking thread, never from an async
/// task, so they may shell out or do heavy CPU work directly.
pub trait ClipRenderer: Send + Sync + 'static {
    /// Compose one asset into a clip at `clip_path`.
    ///
    /// The clip's visual length must equal its audio length, with the image
    /// zooming from 1.0 to `spec.zoom_end()` centred on the canvas.
    fn render_clip(
        &self,
        asset: &AssetPath,
        spec: &RenderSpec,
        clip_path: &Path,
    ) -> CompositionResult<SceneClip>;

    /// Concatenate `clips` in the given order and encode them to `output`.
    fn concat_and_encode(
        &self,
        clips: &[SceneClip],
        spec: &RenderSpec,
        output: &Path,
    ) -> AssemblyResult<()>;

    /// Renderer name for logs.
    fn name(&self) -> &'static str;
}
