use async_trait::async_trait;
use reelsmith_core::NarrationConfig;
use reelsmith_error::{GenerationError, GenerationErrorKind, GenerationResult};
use reelsmith_interface::{ImageGenerator, VoiceSynthesizer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

struct TextImage;

#[async_trait]
impl ImageGenerator for TextImage {
    async fn generate(&self, prompt: &str, destination: &Path) -> GenerationResult<PathBuf> {
        tokio::fs::write(destination, prompt)
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Io(e.to_string())))?;
        Ok(destination.to_path_buf())
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn provider_name(&self) -> &'static str {
        "text"
    }
}

struct CountingVoice;

#[async_trait]
impl VoiceSynthesizer for CountingVoice {
    async fn generate(
        &self,
        text: &str,
        _destination: &Path,
        voice: &NarrationConfig,
    ) -> GenerationResult<f64> {
        Ok(text.split_whitespace().count() as f64 / voice.speed())
    }

    fn file_extension(&self) -> &'static str {
        "wav"
    }

    fn provider_name(&self) -> &'static str {
        "counting"
    }
}

#[tokio::test]
async fn test_image_generator_works_through_shared_trait_object() {
    let dir = TempDir::new().unwrap();
    let generator: Arc<dyn ImageGenerator> = Arc::new(TextImage);
    let destination = dir.path().join("001.txt");

    let written = generator.generate("a red fox", &destination).await.unwrap();

    assert_eq!(written, destination);
    assert_eq!(std::fs::read_to_string(&written).unwrap(), "a red fox");
    assert_eq!(generator.file_extension(), "txt");
}

#[tokio::test]
async fn test_voice_synthesizer_receives_narration_config() {
    let voice: Arc<dyn VoiceSynthesizer> = Arc::new(CountingVoice);
    let narration = NarrationConfig::builder().speed(2.0).build().unwrap();

    let duration = voice
        .generate("one two three four", Path::new("unused.wav"), &narration)
        .await
        .unwrap();

    assert_eq!(duration, 2.0);
    assert_eq!(voice.provider_name(), "counting");
}
