//! Command handlers.

use reelsmith::{
    Blueprint, NarrationConfig, Pipeline, ProductionError, ProductionErrorKind, ReelsmithConfig,
    ReelsmithResult, StorageError, StorageErrorKind, TraceContext, is_ffmpeg_on_path,
};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Read a blueprint from a JSON file.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read and
/// [`ProductionErrorKind::InvalidBlueprint`] if it is not a blueprint.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_blueprint(path: &Path) -> ReelsmithResult<Blueprint> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        let kind = if e.kind() == std::io::ErrorKind::NotFound {
            StorageErrorKind::NotFound(path.display().to_string())
        } else {
            StorageErrorKind::FileRead(format!("{}: {}", path.display(), e))
        };
        StorageError::new(kind)
    })?;

    let blueprint: Blueprint = serde_json::from_str(&text).map_err(|e| {
        ProductionError::new(ProductionErrorKind::InvalidBlueprint(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    info!(topic_id = %blueprint.topic_id(), scenes = blueprint.len(), "Loaded blueprint");
    Ok(blueprint)
}

fn narration_for(config: &ReelsmithConfig, voice: Option<String>) -> NarrationConfig {
    let narration = config.narration().clone();
    match voice {
        Some(voice_id) => narration.with_voice_id(voice_id),
        None => narration,
    }
}

/// Run the full pipeline and print the output descriptor as JSON.
pub async fn render_blueprint(
    config: &ReelsmithConfig,
    blueprint_path: &Path,
    voice: Option<String>,
    ctx: &TraceContext,
) -> Result<(), Box<dyn std::error::Error>> {
    if !is_ffmpeg_on_path() {
        warn!("ffmpeg or ffprobe not found on PATH; every clip will fail to render");
    }
    let blueprint = load_blueprint(blueprint_path)?;
    let pipeline = Pipeline::from_config(config)?;
    let output = pipeline
        .run(&blueprint, &narration_for(config, voice), ctx)
        .await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Run production only and print the manifest as JSON.
pub async fn produce_blueprint(
    config: &ReelsmithConfig,
    blueprint_path: &Path,
    voice: Option<String>,
    ctx: &TraceContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let blueprint = load_blueprint(blueprint_path)?;
    let pipeline = Pipeline::from_config(config)?;
    let report = pipeline
        .produce(&blueprint, &narration_for(config, voice), ctx)
        .await?;
    println!("{}", serde_json::to_string_pretty(report.manifest())?);
    Ok(())
}
