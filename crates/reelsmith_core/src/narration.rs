//! Narration style configuration.

use serde::{Deserialize, Serialize};

/// Voice settings handed to the voice backend.
///
/// The pipeline does not interpret these values; backends map them onto
/// whatever their provider understands.
///
/// # Examples
///
/// ```
/// use reelsmith_core::NarrationConfig;
///
/// let narration = NarrationConfig::builder()
///     .voice_id("nova")
///     .speed(1.25)
///     .build()
///     .unwrap();
///
/// assert_eq!(narration.voice_id(), "nova");
/// assert_eq!(narration.gender(), "neutral");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
#[serde(default)]
pub struct NarrationConfig {
    /// Provider voice identifier
    #[builder(default = "\"alloy\".to_string()")]
    voice_id: String,
    /// Voice gender hint
    #[builder(default = "\"neutral\".to_string()")]
    gender: String,
    /// Voice age group hint
    #[builder(default = "\"adult\".to_string()")]
    age_group: String,
    /// Optional delivery tone
    #[builder(default)]
    tone: Option<String>,
    /// Speaking rate multiplier
    #[builder(default = "1.0")]
    speed: f64,
}

impl NarrationConfig {
    /// Create a narration config builder.
    pub fn builder() -> NarrationConfigBuilder {
        NarrationConfigBuilder::default()
    }

    /// Same settings with a different voice.
    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            voice_id: "alloy".to_string(),
            gender: "neutral".to_string(),
            age_group: "adult".to_string(),
            tone: None,
            speed: 1.0,
        }
    }
}
