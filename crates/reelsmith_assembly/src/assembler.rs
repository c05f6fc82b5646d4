//! Manifest to final video.

use crate::{ClipRenderer, RenderSpec, RenderWorker, SceneClip};
use reelsmith_core::{ProductionManifest, TraceContext, VideoOutput};
use reelsmith_error::{
    AssemblyError, AssemblyErrorKind, AssemblyResult, BuilderError, BuilderErrorKind, ReelsmithResult,
};
use reelsmith_storage::{OutputLayout, TopicDirs, file_size, remove_dir, scene_file_name};
use std::sync::Arc;
use tracing::{info, info_span, instrument, warn};

/// Turns a manifest into one encoded video.
///
/// Clips are rendered in ascending scene order. A clip that fails to compose
/// is logged and skipped; assembly only fails when no clip survives. The
/// reported duration is the sum of every input asset's duration in the
/// manifest, skipped clips included, not a measurement of the encoded file.
///
/// A crash during the final encode can leave a truncated file at the output
/// path; the file is written in place, not renamed into position.
#[derive(Clone, derive_builder::Builder)]
#[builder(build_fn(private, name = "build_internal"))]
pub struct Assembler {
    /// Media backend
    renderer: Arc<dyn ClipRenderer>,
    /// Output location
    output: OutputLayout,
    /// Canvas, timing and codec settings
    #[builder(default)]
    spec: RenderSpec,
    /// Execution slot for render jobs
    #[builder(default = "RenderWorker::shared()")]
    worker: RenderWorker,
}

impl AssemblerBuilder {
    /// Build the assembler.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderErrorKind::MissingField`] if the renderer or output
    /// layout was not set, and [`BuilderErrorKind::ValidationFailed`] for an
    /// unusable render spec.
    pub fn build(&self) -> Result<Assembler, BuilderError> {
        let assembler = self
            .build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))?;
        assembler
            .spec
            .validate()
            .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.message)))?;
        Ok(assembler)
    }
}

impl Assembler {
    /// Create an assembler builder.
    pub fn builder() -> AssemblerBuilder {
        AssemblerBuilder::default()
    }

    /// Render settings in use.
    pub fn spec(&self) -> &RenderSpec {
        &self.spec
    }

    /// Assemble `manifest` into `{output_dir}/{topic_id}_final.{container}`.
    ///
    /// # Errors
    ///
    /// - [`AssemblyErrorKind::EmptyManifest`] immediately, before any
    ///   directory or file is touched
    /// - [`AssemblyErrorKind::NoComposableClips`] when every clip failed; no
    ///   output file is written
    /// - [`AssemblyErrorKind::Encode`] or [`AssemblyErrorKind::WorkerFailed`]
    ///   if the final encode fails
    /// - a storage error if directories cannot be created or the output
    ///   cannot be inspected
    #[instrument(
        skip(self, manifest, ctx),
        fields(trace_id = %ctx, topic_id = %manifest.topic_id(), assets = manifest.len())
    )]
    pub async fn assemble(
        &self,
        manifest: ProductionManifest,
        ctx: &TraceContext,
    ) -> ReelsmithResult<VideoOutput> {
        if manifest.is_empty() {
            return Err(AssemblyError::new(AssemblyErrorKind::EmptyManifest).into());
        }

        self.output.prepare().await?;
        let output_path = self
            .output
            .final_path(manifest.topic_id(), self.spec.container());
        let clips_dir = TopicDirs::at(manifest.base_dir()).clips_dir();
        tokio::fs::create_dir_all(&clips_dir).await.map_err(|e| {
            AssemblyError::new(AssemblyErrorKind::Io(format!(
                "{}: {}",
                clips_dir.display(),
                e
            )))
        })?;

        info!(renderer = self.renderer.name(), output = %output_path.display(), "Starting assembly");

        let renderer = self.renderer.clone();
        let spec = self.spec.clone();
        let topic_id = manifest.topic_id().clone();
        let duration = manifest.total_duration();
        let assets = manifest.into_assets();
        let job_clips_dir = clips_dir.clone();
        let job_output = output_path.clone();
        let span = info_span!("render", trace_id = %ctx, topic_id = %topic_id);

        let rendered = self
            .worker
            .run(move || -> AssemblyResult<Vec<SceneClip>> {
                let _entered = span.enter();
                let attempted = assets.len();
                let mut clips: Vec<SceneClip> = Vec::with_capacity(attempted);

                for asset in &assets {
                    let scene_id = *asset.scene_id();
                    let clip_path = job_clips_dir.join(scene_file_name(scene_id, spec.container()));
                    match renderer.render_clip(asset, &spec, &clip_path) {
                        Ok(clip) => clips.push(clip),
                        Err(e) => warn!(scene_id, error = %e.kind, "Skipping clip that failed to compose"),
                    }
                }

                if clips.is_empty() {
                    return Err(AssemblyError::new(AssemblyErrorKind::NoComposableClips {
                        attempted,
                    }));
                }

                renderer.concat_and_encode(&clips, &spec, &job_output)?;
                Ok(clips)
            })
            .await
            .and_then(|result| result);

        if !self.spec.keep_intermediates() {
            if let Err(e) = remove_dir(&clips_dir).await {
                warn!(error = %e, "Failed to remove intermediate clips");
            }
        }

        let clips = rendered?;
        let size = file_size(&output_path).await?;
        let output = VideoOutput::new(topic_id, output_path, duration, size);

        info!(
            clips = clips.len(),
            duration,
            composed_duration = clips.iter().map(|clip| clip.asset_duration()).sum::<f64>(),
            size_mb = output.file_size_mb(),
            output = %output.file_path().display(),
            "Assembly finished"
        );
        Ok(output)
    }
}

impl std::fmt::Debug for Assembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("renderer", &self.renderer.name())
            .field("output", &self.output)
            .field("spec", &self.spec)
            .field("worker", &self.worker)
            .finish()
    }
}
