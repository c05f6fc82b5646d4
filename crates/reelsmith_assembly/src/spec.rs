//! Output format settings.

use reelsmith_error::ConfigError;
use serde::{Deserialize, Serialize};

/// `[render]` section: canvas, timing and codec settings.
///
/// # Examples
///
/// ```
/// use reelsmith_assembly::RenderSpec;
///
/// let spec = RenderSpec::default();
/// assert_eq!((*spec.width(), *spec.height(), *spec.fps()), (1280, 720, 24));
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct RenderSpec {
    /// Canvas width in pixels
    width: u32,
    /// Canvas height in pixels
    height: u32,
    /// Output frame rate
    fps: u32,
    /// Zoom factor reached at the end of each clip (starts at 1.0)
    zoom_end: f64,
    /// ffmpeg video encoder
    video_codec: String,
    /// ffmpeg audio encoder
    audio_codec: String,
    /// Encoder preset
    preset: String,
    /// Output container extension
    container: String,
    /// Keep per-scene clips after encoding
    keep_intermediates: bool,
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 24,
            zoom_end: 1.1,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "ultrafast".to_string(),
            container: "mp4".to_string(),
            keep_intermediates: false,
        }
    }
}

impl RenderSpec {
    /// Override the canvas size.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Override the frame rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Keep or discard per-scene clips after encoding.
    pub fn with_keep_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }

    /// Frames needed to cover `seconds`, at least one.
    pub fn frames_for(&self, seconds: f64) -> u32 {
        ((seconds * self.fps as f64).ceil() as u32).max(1)
    }

    /// Check the settings can drive an encoder.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for zero or odd canvas dimensions, a zero frame
    /// rate, a zoom below 1.0, or empty codec and container names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid("render.width", format!("{}x{} must be non-zero", self.width, self.height)));
        }
        // yuv420p needs even dimensions.
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(ConfigError::invalid(
                "render.width",
                format!("{}x{} must have even dimensions", self.width, self.height),
            ));
        }
        if self.fps == 0 {
            return Err(ConfigError::invalid("render.fps", "must be greater than zero"));
        }
        if self.zoom_end.is_nan() || self.zoom_end < 1.0 {
            return Err(ConfigError::invalid(
                "render.zoom_end",
                format!("{} must be at least 1.0", self.zoom_end),
            ));
        }
        for (name, value) in [
            ("video_codec", &self.video_codec),
            ("audio_codec", &self.audio_codec),
            ("preset", &self.preset),
            ("container", &self.container),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(format!("render.{}", name), "must not be empty"));
            }
        }
        Ok(())
    }
}
