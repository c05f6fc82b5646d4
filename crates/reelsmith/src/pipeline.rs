//! Production followed by assembly.

use crate::ReelsmithConfig;
use reelsmith_assembly::{Assembler, FfmpegRenderer};
use reelsmith_core::{Blueprint, NarrationConfig, TraceContext, VideoOutput};
use reelsmith_error::ReelsmithResult;
use reelsmith_models::ProviderFactory;
use reelsmith_production::{ContentProducer, ProductionReport};
use reelsmith_storage::{AssetLayout, OutputLayout};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Runs a blueprint through production and assembly.
///
/// Production always completes before assembly starts. The same
/// [`TraceContext`] is attached to both phases.
#[derive(Debug, Clone)]
pub struct Pipeline {
    producer: ContentProducer,
    assembler: Assembler,
}

impl Pipeline {
    /// Combine a producer and an assembler.
    pub fn new(producer: ContentProducer, assembler: Assembler) -> Self {
        Self {
            producer,
            assembler,
        }
    }

    /// Build the backends, producer and ffmpeg assembler described by
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a backend cannot be created (for
    /// example a missing API key), or a builder error for invalid render
    /// settings.
    pub fn from_config(config: &ReelsmithConfig) -> ReelsmithResult<Self> {
        let factory = ProviderFactory::new(config.providers().clone(), config.rate_limit().clone());

        let producer = ContentProducer::builder()
            .image(factory.image_generator()?)
            .voice(factory.voice_synthesizer()?)
            .layout(AssetLayout::new(config.paths().asset_dir()))
            .retry(config.retry().policy())
            .max_concurrent_scenes(*config.production().max_concurrent_scenes())
            .build()?;

        let assembler = Assembler::builder()
            .renderer(Arc::new(FfmpegRenderer::new()))
            .output(OutputLayout::new(config.paths().output_dir()))
            .spec(config.render().clone())
            .build()?;

        Ok(Self::new(producer, assembler))
    }

    /// The production stage.
    pub fn producer(&self) -> &ContentProducer {
        &self.producer
    }

    /// The assembly stage.
    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    /// Run production only.
    ///
    /// # Errors
    ///
    /// See [`ContentProducer::produce`].
    pub async fn produce(
        &self,
        blueprint: &Blueprint,
        narration: &NarrationConfig,
        ctx: &TraceContext,
    ) -> ReelsmithResult<ProductionReport> {
        let report = self.producer.produce(blueprint, narration, ctx).await?;
        if !report.is_complete() {
            warn!(
                trace_id = %ctx,
                failed = ?report.failed_scene_ids(),
                "Continuing with partial manifest"
            );
        }
        Ok(report)
    }

    /// Produce every scene, then assemble the survivors into one video.
    ///
    /// # Errors
    ///
    /// Fails if production yields no scenes or assembly cannot encode any
    /// clip. Individual scene and clip failures are logged and skipped.
    #[instrument(
        skip_all,
        fields(trace_id = %ctx, topic_id = %blueprint.topic_id())
    )]
    pub async fn run(
        &self,
        blueprint: &Blueprint,
        narration: &NarrationConfig,
        ctx: &TraceContext,
    ) -> ReelsmithResult<VideoOutput> {
        info!(scenes = blueprint.len(), "Production phase started");
        let report = self.produce(blueprint, narration, ctx).await?;
        info!(
            produced = report.manifest().len(),
            failed = report.failures().len(),
            "Production phase finished"
        );

        info!("Assembly phase started");
        let output = self.assembler.assemble(report.into_manifest(), ctx).await?;
        info!(
            duration = *output.duration(),
            output = %output.file_path().display(),
            "Assembly phase finished"
        );
        Ok(output)
    }
}
