//! One scene's image and narration, produced together or not at all.

use crate::{FailureCause, SceneFailure, SceneOutcome};
use reelsmith_core::{AssetPath, NarrationConfig, Scene};
use reelsmith_interface::{ImageGenerator, VoiceSynthesizer};
use reelsmith_rate_limit::RetryPolicy;
use reelsmith_storage::TopicDirs;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Drives the image call and the voice call for one scene.
///
/// Both calls start concurrently, each under its own retry policy, and the
/// task waits for both. An [`AssetPath`] is only returned when both succeed,
/// so a scene never surfaces with an image but no narration or the reverse.
#[derive(Clone)]
pub struct SceneAssetTask {
    scene: Scene,
    dirs: TopicDirs,
    narration: Arc<NarrationConfig>,
    image: Arc<dyn ImageGenerator>,
    voice: Arc<dyn VoiceSynthesizer>,
    retry: RetryPolicy,
}

impl SceneAssetTask {
    /// Create a task for `scene`, writing into `dirs`.
    pub fn new(
        scene: Scene,
        dirs: TopicDirs,
        narration: Arc<NarrationConfig>,
        image: Arc<dyn ImageGenerator>,
        voice: Arc<dyn VoiceSynthesizer>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            scene,
            dirs,
            narration,
            image,
            voice,
            retry,
        }
    }

    /// Scene this task produces.
    pub fn scene_id(&self) -> u32 {
        *self.scene.id()
    }

    /// Run both generations to completion.
    #[instrument(skip(self), fields(scene_id = self.scene_id()))]
    pub async fn run(self) -> SceneOutcome {
        let scene_id = self.scene_id();
        let image_path = self.dirs.image_path(scene_id, self.image.file_extension());
        let audio_path = self.dirs.audio_path(scene_id, self.voice.file_extension());

        let (image, voice) = tokio::join!(
            self.retry.run("image", || {
                self.image.generate(self.scene.visual_prompt(), &image_path)
            }),
            self.retry.run("voice", || {
                self.voice
                    .generate(self.scene.narration(), &audio_path, &self.narration)
            }),
        );

        match (image, voice) {
            (Ok(image_path), Ok(duration)) => {
                debug!(duration, "Scene assets ready");
                Ok(AssetPath::new(scene_id, image_path, audio_path, duration))
            }
            (Err(image), Ok(_)) => Err(SceneFailure::new(scene_id, FailureCause::Image(image))),
            (Ok(_), Err(voice)) => Err(SceneFailure::new(scene_id, FailureCause::Voice(voice))),
            (Err(image), Err(voice)) => Err(SceneFailure::new(
                scene_id,
                FailureCause::Both { image, voice },
            )),
        }
    }
}

impl std::fmt::Debug for SceneAssetTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneAssetTask")
            .field("scene_id", &self.scene_id())
            .field("image", &self.image.provider_name())
            .field("voice", &self.voice.provider_name())
            .field("retry", &self.retry)
            .finish()
    }
}
