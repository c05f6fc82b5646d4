//! Fan-out/fan-in over scene tasks.

use crate::{FailureCause, ProductionReport, SceneAssetTask, SceneFailure};
use futures::stream::{FuturesUnordered, StreamExt};
use reelsmith_core::{Blueprint, NarrationConfig, ProductionManifest, TraceContext};
use reelsmith_error::{
    BuilderError, BuilderErrorKind, ProductionError, ProductionErrorKind, ReelsmithResult,
};
use reelsmith_interface::{ImageGenerator, VoiceSynthesizer};
use reelsmith_rate_limit::RetryPolicy;
use reelsmith_storage::AssetLayout;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{Instrument, error, info, info_span, instrument};

/// Produces assets for every scene of a blueprint concurrently.
///
/// Scene tasks run as independent Tokio tasks: one scene failing, even by
/// panicking, never cancels or corrupts another. Parallelism is unbounded
/// unless `max_concurrent_scenes` is set.
///
/// # Examples
///
/// ```ignore
/// use reelsmith_core::{Blueprint, NarrationConfig, TraceContext};
/// use reelsmith_models::{MockImageGenerator, MockVoiceSynthesizer};
/// use reelsmith_production::ContentProducer;
/// use reelsmith_storage::AssetLayout;
/// use std::sync::Arc;
///
/// # async fn run(blueprint: Blueprint) -> reelsmith_error::ReelsmithResult<()> {
/// let producer = ContentProducer::builder()
///     .image(Arc::new(MockImageGenerator::new()))
///     .voice(Arc::new(MockVoiceSynthesizer::new()))
///     .layout(AssetLayout::new("assets"))
///     .build()?;
///
/// let report = producer
///     .produce(&blueprint, &NarrationConfig::default(), &TraceContext::new())
///     .await?;
/// println!("{} scenes produced", report.manifest().len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(build_fn(private, name = "build_internal"))]
pub struct ContentProducer {
    /// Image backend
    image: Arc<dyn ImageGenerator>,
    /// Voice backend
    voice: Arc<dyn VoiceSynthesizer>,
    /// Where assets are written
    layout: AssetLayout,
    /// Retry policy applied to each generation call
    #[builder(default)]
    retry: RetryPolicy,
    /// Cap on scenes in flight; `None` or zero means unbounded
    #[builder(default)]
    max_concurrent_scenes: Option<usize>,
}

impl ContentProducerBuilder {
    /// Build the producer.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderErrorKind::MissingField`] if a backend or the layout
    /// was not set.
    pub fn build(&self) -> Result<ContentProducer, BuilderError> {
        self.build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

impl ContentProducer {
    /// Create a producer builder.
    pub fn builder() -> ContentProducerBuilder {
        ContentProducerBuilder::default()
    }

    /// Retry policy in use.
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Produce assets for every scene of `blueprint`.
    ///
    /// Waits for every scene to reach a terminal state. Failed scenes are
    /// logged with their id and cause and left out of the manifest; the
    /// manifest is sorted by scene id whatever order tasks finished in.
    ///
    /// # Errors
    ///
    /// - [`ProductionErrorKind::InvalidBlueprint`] before any work starts
    /// - a storage error if the topic directories cannot be created
    /// - [`ProductionErrorKind::NoScenesProduced`] when every scene failed
    #[instrument(
        skip(self, blueprint, narration, ctx),
        fields(trace_id = %ctx, topic_id = %blueprint.topic_id(), scenes = blueprint.len())
    )]
    pub async fn produce(
        &self,
        blueprint: &Blueprint,
        narration: &NarrationConfig,
        ctx: &TraceContext,
    ) -> ReelsmithResult<ProductionReport> {
        blueprint.validate()?;
        let dirs = self.layout.prepare(blueprint.topic_id()).await?;

        let narration = Arc::new(narration.clone());
        let limiter = self
            .max_concurrent_scenes
            .filter(|n| *n > 0)
            .map(|n| Arc::new(Semaphore::new(n)));

        info!(
            image = self.image.provider_name(),
            voice = self.voice.provider_name(),
            max_attempts = self.retry.max_attempts(),
            "Launching scene tasks"
        );

        let mut pending = FuturesUnordered::new();
        for scene in blueprint.scenes() {
            let scene_id = *scene.id();
            let task = SceneAssetTask::new(
                scene.clone(),
                dirs.clone(),
                narration.clone(),
                self.image.clone(),
                self.voice.clone(),
                self.retry,
            );
            let limiter = limiter.clone();
            let span = info_span!("scene", trace_id = %ctx, scene_id);

            let handle = tokio::spawn(
                async move {
                    let _permit = match limiter {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    task.run().await
                }
                .instrument(span),
            );
            pending.push(async move { (scene_id, handle.await) });
        }

        let mut assets = Vec::with_capacity(blueprint.len());
        let mut failures = Vec::new();
        while let Some((scene_id, joined)) = pending.next().await {
            let outcome = joined.unwrap_or_else(|e| {
                Err(SceneFailure::new(scene_id, FailureCause::Aborted(e.to_string())))
            });
            match outcome {
                Ok(asset) => {
                    info!(trace_id = %ctx, scene_id, duration = asset.duration(), "Scene produced");
                    assets.push(asset);
                }
                Err(failure) => {
                    error!(
                        trace_id = %ctx,
                        scene_id,
                        cause = %failure.cause(),
                        "Scene production failed"
                    );
                    failures.push(failure);
                }
            }
        }

        if assets.is_empty() {
            return Err(ProductionError::new(ProductionErrorKind::NoScenesProduced {
                attempted: blueprint.len(),
            })
            .into());
        }

        let manifest = ProductionManifest::new(blueprint.topic_id(), dirs.root(), assets);
        info!(
            produced = manifest.len(),
            failed = failures.len(),
            "Production finished"
        );
        Ok(ProductionReport::new(manifest, failures))
    }
}

impl std::fmt::Debug for ContentProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentProducer")
            .field("image", &self.image.provider_name())
            .field("voice", &self.voice.provider_name())
            .field("layout", &self.layout)
            .field("retry", &self.retry)
            .field("max_concurrent_scenes", &self.max_concurrent_scenes)
            .finish()
    }
}
