//! Trait definitions for generation backends.

use async_trait::async_trait;
use reelsmith_core::NarrationConfig;
use reelsmith_error::GenerationResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Backend that renders a still image from a text prompt.
///
/// Implementations write the image to `destination`, overwriting anything
/// already there, and return the path actually written.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for `prompt` at `destination`.
    async fn generate(&self, prompt: &str, destination: &Path) -> GenerationResult<PathBuf>;

    /// File extension of the images this backend writes (without the dot).
    fn file_extension(&self) -> &'static str;

    /// Provider name (e.g., "openai", "mock").
    fn provider_name(&self) -> &'static str;
}

/// Backend that speaks narration text into an audio file.
#[async_trait]
pub trait VoiceSynthesizer: Send + Sync {
    /// Synthesize `text` into `destination` using `voice`.
    ///
    /// Returns the narration length in seconds. The pipeline treats this value
    /// as the timing authority for the scene.
    async fn generate(
        &self,
        text: &str,
        destination: &Path,
        voice: &NarrationConfig,
    ) -> GenerationResult<f64>;

    /// File extension of the audio this backend writes (without the dot).
    fn file_extension(&self) -> &'static str;

    /// Provider name (e.g., "openai", "mock").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: ImageGenerator + ?Sized> ImageGenerator for Arc<T> {
    async fn generate(&self, prompt: &str, destination: &Path) -> GenerationResult<PathBuf> {
        (**self).generate(prompt, destination).await
    }

    fn file_extension(&self) -> &'static str {
        (**self).file_extension()
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: VoiceSynthesizer + ?Sized> VoiceSynthesizer for Arc<T> {
    async fn generate(
        &self,
        text: &str,
        destination: &Path,
        voice: &NarrationConfig,
    ) -> GenerationResult<f64> {
        (**self).generate(text, destination, voice).await
    }

    fn file_extension(&self) -> &'static str {
        (**self).file_extension()
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
