//! Narration through the OpenAI speech endpoint.

use super::dto::SpeechRequest;
use super::{Connection, DEFAULT_API_BASE, write_asset};
use async_trait::async_trait;
use reelsmith_core::NarrationConfig;
use reelsmith_error::{GenerationError, GenerationErrorKind, GenerationResult};
use reelsmith_interface::VoiceSynthesizer;
use std::path::Path;
use tracing::{debug, instrument};

const SECONDS_PER_WORD: f64 = 0.5;

/// Voice backend for `POST {api_base}/audio/speech`.
///
/// The endpoint returns only audio bytes, so the reported duration is an
/// estimate from word count and speaking rate.
#[derive(Debug, Clone)]
pub struct OpenAiVoiceSynthesizer {
    connection: Connection,
    model: String,
}

impl OpenAiVoiceSynthesizer {
    /// Create a backend using `OPENAI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::Unavailable`] if the key is not set.
    #[instrument(skip_all)]
    pub fn from_env(api_base: Option<&str>, model: impl Into<String>) -> GenerationResult<Self> {
        Ok(Self {
            connection: Connection::from_env(api_base.unwrap_or(DEFAULT_API_BASE))?,
            model: model.into(),
        })
    }

    /// Create a backend with an explicit key.
    pub fn with_api_key(
        api_key: impl Into<String>,
        api_base: Option<&str>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            connection: Connection::new(api_key, api_base.unwrap_or(DEFAULT_API_BASE)),
            model: model.into(),
        }
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VoiceSynthesizer for OpenAiVoiceSynthesizer {
    #[instrument(skip(self, text, voice), fields(model = %self.model, voice_id = %voice.voice_id(), destination = %destination.display()))]
    async fn generate(
        &self,
        text: &str,
        destination: &Path,
        voice: &NarrationConfig,
    ) -> GenerationResult<f64> {
        let speed = voice.speed().clamp(0.25, 4.0);
        let request = SpeechRequest::builder()
            .model(self.model.clone())
            .input(text)
            .voice(voice.voice_id().clone())
            .speed(speed)
            .instructions(voice.tone().clone())
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Encoding(e.to_string())))?;

        let bytes = self
            .connection
            .post("audio/speech", &request)
            .await?
            .bytes()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!(
                    "Failed to read audio body: {}",
                    e
                )))
            })?;

        if bytes.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::InvalidResponse(
                "empty audio body".to_string(),
            )));
        }

        write_asset(destination, &bytes).await?;

        let words = text.split_whitespace().count() as f64;
        let seconds = words * SECONDS_PER_WORD / speed;
        debug!(bytes = bytes.len(), seconds, "Wrote narration");
        Ok(seconds)
    }

    fn file_extension(&self) -> &'static str {
        "mp3"
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
