//! Deterministic offline backends.

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use reelsmith_core::NarrationConfig;
use reelsmith_error::{GenerationError, GenerationErrorKind, GenerationResult};
use reelsmith_interface::{ImageGenerator, VoiceSynthesizer};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const MOCK_SAMPLE_RATE: u32 = 16_000;
const MIN_NARRATION_SECONDS: f64 = 2.0;
const SECONDS_PER_WORD: f64 = 0.5;

/// Estimated narration length: half a second per word, never below two
/// seconds, scaled by speaking rate.
///
/// # Examples
///
/// ```
/// use reelsmith_models::estimate_narration_seconds;
///
/// assert_eq!(estimate_narration_seconds("one two", 1.0), 2.0);
/// assert_eq!(estimate_narration_seconds("a b c d e f", 1.0), 3.0);
/// assert_eq!(estimate_narration_seconds("a b c d e f", 2.0), 1.5);
/// ```
pub fn estimate_narration_seconds(text: &str, speed: f64) -> f64 {
    let words = text.split_whitespace().count() as f64;
    let speed = if speed > 0.0 { speed } else { 1.0 };
    (words * SECONDS_PER_WORD).max(MIN_NARRATION_SECONDS) / speed
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

fn io_error(path: &Path, e: impl std::fmt::Display) -> GenerationError {
    GenerationError::new(GenerationErrorKind::Io(format!("{}: {}", path.display(), e)))
}

/// Writes a PNG whose colours derive from a SHA-256 of the prompt.
///
/// The same prompt always yields the same image.
#[derive(Debug, Clone)]
pub struct MockImageGenerator {
    width: u32,
    height: u32,
    latency: Duration,
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            latency: Duration::ZERO,
        }
    }
}

impl MockImageGenerator {
    /// Create a mock producing 640×360 images instantly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Sleep this long before each generation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn render(&self, prompt: &str) -> GenerationResult<Vec<u8>> {
        let digest = Sha256::digest(prompt.as_bytes());
        let top = [digest[0], digest[1], digest[2]];
        let bottom = [digest[3], digest[4], digest[5]];
        let height = self.height;

        // Vertical gradient so zooming is visible in rendered clips.
        let image = RgbImage::from_fn(self.width, self.height, |_, y| {
            let t = y as f32 / height as f32;
            let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
            Rgb([
                mix(top[0], bottom[0]),
                mix(top[1], bottom[1]),
                mix(top[2], bottom[2]),
            ])
        });

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| GenerationError::new(GenerationErrorKind::Encoding(e.to_string())))?;
        Ok(bytes)
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    #[instrument(skip(self, prompt), fields(destination = %destination.display()))]
    async fn generate(&self, prompt: &str, destination: &Path) -> GenerationResult<PathBuf> {
        simulate_latency(self.latency).await;
        let bytes = self.render(prompt)?;
        tokio::fs::write(destination, bytes)
            .await
            .map_err(|e| io_error(destination, e))?;
        debug!("Wrote mock image");
        Ok(destination.to_path_buf())
    }

    fn file_extension(&self) -> &'static str {
        "png"
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Writes silent mono WAV files of the estimated narration length.
#[derive(Debug, Clone, Default)]
pub struct MockVoiceSynthesizer {
    latency: Duration,
}

impl MockVoiceSynthesizer {
    /// Create a mock that answers instantly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before each synthesis.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

fn write_silence(path: &Path, seconds: f64) -> GenerationResult<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: MOCK_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let samples = (seconds * MOCK_SAMPLE_RATE as f64).round() as u32;

    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| io_error(path, e))?;
    for _ in 0..samples {
        writer.write_sample(0i16).map_err(|e| io_error(path, e))?;
    }
    writer.finalize().map_err(|e| io_error(path, e))
}

#[async_trait]
impl VoiceSynthesizer for MockVoiceSynthesizer {
    #[instrument(skip(self, text, voice), fields(destination = %destination.display(), voice_id = %voice.voice_id()))]
    async fn generate(
        &self,
        text: &str,
        destination: &Path,
        voice: &NarrationConfig,
    ) -> GenerationResult<f64> {
        simulate_latency(self.latency).await;
        let seconds = estimate_narration_seconds(text, *voice.speed());
        let path = destination.to_path_buf();

        tokio::task::spawn_blocking(move || write_silence(&path, seconds))
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Encoding(format!(
                    "WAV writer task failed: {}",
                    e
                )))
            })??;

        debug!(seconds, "Wrote mock narration");
        Ok(seconds)
    }

    fn file_extension(&self) -> &'static str {
        "wav"
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
