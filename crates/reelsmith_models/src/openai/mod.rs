//! OpenAI-compatible HTTP backends.

mod dto;
mod image;
mod speech;

pub use image::OpenAiImageGenerator;
pub use speech::OpenAiVoiceSynthesizer;

use reelsmith_error::{GenerationError, GenerationErrorKind, GenerationResult};
use reqwest::{Client, Response};
use serde::Serialize;

/// Environment variable holding the API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Default API root.
pub(crate) const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Connection details shared by the image and speech backends.
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    client: Client,
    api_key: String,
    api_base: String,
}

impl Connection {
    pub(crate) fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn from_env(api_base: impl Into<String>) -> GenerationResult<Self> {
        let api_key = std::env::var(OPENAI_API_KEY_VAR).map_err(|e| {
            GenerationError::new(GenerationErrorKind::Unavailable(format!(
                "{} not set: {}",
                OPENAI_API_KEY_VAR, e
            )))
        })?;
        Ok(Self::new(api_key, api_base))
    }

    pub(crate) fn api_base(&self) -> &str {
        &self.api_base
    }

    /// POST a JSON body and return the successful response.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GenerationResult<Response> {
        let url = format!("{}/{}", self.api_base, path);
        tracing::debug!(url = %url, "Sending OpenAI request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::new(GenerationErrorKind::Provider {
                status,
                message,
            }));
        }

        Ok(response)
    }
}

pub(crate) async fn write_asset(path: &std::path::Path, bytes: &[u8]) -> GenerationResult<()> {
    tokio::fs::write(path, bytes).await.map_err(|e| {
        GenerationError::new(GenerationErrorKind::Io(format!("{}: {}", path.display(), e)))
    })
}
