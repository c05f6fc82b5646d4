//! Request and response bodies for the OpenAI images and speech endpoints.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of `POST /images/generations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Model identifier
    model: String,
    /// Image prompt
    prompt: String,
    /// Number of images
    #[builder(default = "1")]
    n: u32,
    /// Size such as `1792x1024`
    size: String,
    /// Always `b64_json`; the image is written locally
    #[builder(default = "\"b64_json\".to_string()")]
    response_format: String,
}

impl ImageRequest {
    /// Creates a new builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// Response of `POST /images/generations`.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ImageResponse {
    /// Generated images
    #[serde(default)]
    data: Vec<ImageDatum>,
}

/// One generated image.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ImageDatum {
    /// Base64-encoded image bytes
    #[serde(default)]
    b64_json: Option<String>,
}

/// Body of `POST /audio/speech`.
#[derive(Debug, Clone, PartialEq, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct SpeechRequest {
    /// Model identifier
    model: String,
    /// Text to speak
    input: String,
    /// Voice name
    voice: String,
    /// Speaking rate
    #[builder(default = "1.0")]
    speed: f64,
    /// Audio container
    #[builder(default = "\"mp3\".to_string()")]
    response_format: String,
    /// Delivery instructions, such as tone
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
}

impl SpeechRequest {
    /// Creates a new builder for `SpeechRequest`.
    pub fn builder() -> SpeechRequestBuilder {
        SpeechRequestBuilder::default()
    }
}
