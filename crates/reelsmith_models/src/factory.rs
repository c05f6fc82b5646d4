//! Backend selection from configuration.

use crate::{
    MockImageGenerator, MockVoiceSynthesizer, OpenAiImageGenerator, OpenAiVoiceSynthesizer,
};
use reelsmith_error::ConfigError;
use reelsmith_interface::{ImageGenerator, VoiceSynthesizer};
use reelsmith_rate_limit::{RateLimitConfig, RateLimiter, Throttled};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Which implementation backs a capability.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    /// Deterministic offline backend
    #[default]
    Mock,
    /// OpenAI-compatible HTTP API
    OpenAi,
}

/// `[providers]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ProviderSettings {
    /// Image backend
    image: ProviderKind,
    /// Voice backend
    voice: ProviderKind,
    /// API root for HTTP backends; provider default when unset
    api_base: Option<String>,
    /// Image model identifier
    image_model: String,
    /// Requested image size
    image_size: String,
    /// Speech model identifier
    voice_model: String,
    /// Simulated latency for mock backends
    mock_latency_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            image: ProviderKind::Mock,
            voice: ProviderKind::Mock,
            api_base: None,
            image_model: "dall-e-3".to_string(),
            image_size: "1792x1024".to_string(),
            voice_model: "tts-1".to_string(),
            mock_latency_ms: 0,
        }
    }
}

impl ProviderSettings {
    /// Settings selecting `image` and `voice` with default models.
    pub fn new(image: ProviderKind, voice: ProviderKind) -> Self {
        Self {
            image,
            voice,
            ..Self::default()
        }
    }
}

/// Builds the backends named by [`ProviderSettings`].
///
/// When rate limits are configured, each backend gets its own
/// [`RateLimiter`] through [`Throttled`].
///
/// # Examples
///
/// ```
/// use reelsmith_models::{ProviderFactory, ProviderKind, ProviderSettings};
/// use reelsmith_rate_limit::RateLimitConfig;
///
/// let factory = ProviderFactory::new(
///     ProviderSettings::new(ProviderKind::Mock, ProviderKind::Mock),
///     RateLimitConfig::default(),
/// );
/// let image = factory.image_generator().unwrap();
/// assert_eq!(image.provider_name(), "mock");
/// ```
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    settings: ProviderSettings,
    rate_limit: RateLimitConfig,
}

impl ProviderFactory {
    /// Create a factory.
    pub fn new(settings: ProviderSettings, rate_limit: RateLimitConfig) -> Self {
        Self {
            settings,
            rate_limit,
        }
    }

    fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.settings.mock_latency_ms)
    }

    /// Build the image backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an HTTP backend is selected but
    /// `OPENAI_API_KEY` is not set.
    #[tracing::instrument(skip(self), fields(provider = %self.settings.image))]
    pub fn image_generator(&self) -> Result<Arc<dyn ImageGenerator>, ConfigError> {
        let backend: Arc<dyn ImageGenerator> = match self.settings.image {
            ProviderKind::Mock => {
                Arc::new(MockImageGenerator::new().with_latency(self.mock_latency()))
            }
            ProviderKind::OpenAi => Arc::new(
                OpenAiImageGenerator::from_env(
                    self.settings.api_base.as_deref(),
                    self.settings.image_model.clone(),
                    self.settings.image_size.clone(),
                )
                .map_err(|e| ConfigError::new(e.kind.to_string()))?,
            ),
        };

        if self.rate_limit.is_enabled() {
            let limiter = RateLimiter::new(&self.rate_limit);
            return Ok(Arc::new(Throttled::new(backend, limiter)));
        }
        Ok(backend)
    }

    /// Build the voice backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an HTTP backend is selected but
    /// `OPENAI_API_KEY` is not set.
    #[tracing::instrument(skip(self), fields(provider = %self.settings.voice))]
    pub fn voice_synthesizer(&self) -> Result<Arc<dyn VoiceSynthesizer>, ConfigError> {
        let backend: Arc<dyn VoiceSynthesizer> = match self.settings.voice {
            ProviderKind::Mock => {
                Arc::new(MockVoiceSynthesizer::new().with_latency(self.mock_latency()))
            }
            ProviderKind::OpenAi => Arc::new(
                OpenAiVoiceSynthesizer::from_env(
                    self.settings.api_base.as_deref(),
                    self.settings.voice_model.clone(),
                )
                .map_err(|e| ConfigError::new(e.kind.to_string()))?,
            ),
        };

        if self.rate_limit.is_enabled() {
            let limiter = RateLimiter::new(&self.rate_limit);
            return Ok(Arc::new(Throttled::new(backend, limiter)));
        }
        Ok(backend)
    }
}
