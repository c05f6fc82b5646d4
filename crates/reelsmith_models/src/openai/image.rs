//! Image generation through the OpenAI images endpoint.

use super::dto::{ImageRequest, ImageResponse};
use super::{Connection, DEFAULT_API_BASE, write_asset};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reelsmith_error::{GenerationError, GenerationErrorKind, GenerationResult};
use reelsmith_interface::ImageGenerator;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Image backend for `POST {api_base}/images/generations`.
#[derive(Debug, Clone)]
pub struct OpenAiImageGenerator {
    connection: Connection,
    model: String,
    size: String,
}

impl OpenAiImageGenerator {
    /// Create a backend using `OPENAI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::Unavailable`] if the key is not set.
    #[instrument(skip_all)]
    pub fn from_env(
        api_base: Option<&str>,
        model: impl Into<String>,
        size: impl Into<String>,
    ) -> GenerationResult<Self> {
        Ok(Self {
            connection: Connection::from_env(api_base.unwrap_or(DEFAULT_API_BASE))?,
            model: model.into(),
            size: size.into(),
        })
    }

    /// Create a backend with an explicit key.
    pub fn with_api_key(
        api_key: impl Into<String>,
        api_base: Option<&str>,
        model: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            connection: Connection::new(api_key, api_base.unwrap_or(DEFAULT_API_BASE)),
            model: model.into(),
            size: size.into(),
        }
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// API root in use.
    pub fn api_base(&self) -> &str {
        self.connection.api_base()
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, destination = %destination.display()))]
    async fn generate(&self, prompt: &str, destination: &Path) -> GenerationResult<PathBuf> {
        let request = ImageRequest::builder()
            .model(self.model.clone())
            .prompt(prompt)
            .size(self.size.clone())
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Encoding(e.to_string())))?;

        let response: ImageResponse = self
            .connection
            .post("images/generations", &request)
            .await?
            .json()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::InvalidResponse(format!(
                    "Failed to parse response: {}",
                    e
                )))
            })?;

        let encoded = response
            .data()
            .first()
            .and_then(|datum| datum.b64_json().as_deref())
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::InvalidResponse(
                    "response contained no image data".to_string(),
                ))
            })?;

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| GenerationError::new(GenerationErrorKind::Encoding(e.to_string())))?;

        write_asset(destination, &bytes).await?;
        debug!(bytes = bytes.len(), "Wrote generated image");
        Ok(destination.to_path_buf())
    }

    fn file_extension(&self) -> &'static str {
        "png"
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
