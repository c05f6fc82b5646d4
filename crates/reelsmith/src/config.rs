//! Layered configuration for the pipeline and the CLI.

use ::config::{Config, Environment, File, FileFormat};
use reelsmith_assembly::RenderSpec;
use reelsmith_core::NarrationConfig;
use reelsmith_error::{ConfigError, ReelsmithResult};
use reelsmith_models::ProviderSettings;
use reelsmith_rate_limit::{RateLimitConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../reelsmith.toml");

/// Prefix for environment overrides, e.g. `REELSMITH__RETRY__MAX_ATTEMPTS`.
const ENV_PREFIX: &str = "REELSMITH";

/// `[paths]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct PathsConfig {
    /// Root for per-topic image and audio directories
    asset_dir: PathBuf,
    /// Directory receiving final videos
    output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl PathsConfig {
    /// Create a paths section.
    pub fn new(asset_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// `[production]` section.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct ProductionConfig {
    /// Cap on scenes in flight; absent means every scene at once
    max_concurrent_scenes: Option<usize>,
}

/// Log output format.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// `[logging]` section.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format
    format: LogFormat,
}

impl LoggingConfig {
    /// Create a logging section.
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }
}

/// Complete reelsmith configuration.
///
/// Every section is optional in a file; anything left out keeps its default.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct ReelsmithConfig {
    /// Asset and output locations
    paths: PathsConfig,
    /// Generation retry policy
    retry: RetryConfig,
    /// Production fan-out settings
    production: ProductionConfig,
    /// Per-backend rate limits
    rate_limit: RateLimitConfig,
    /// Backend selection
    providers: ProviderSettings,
    /// Render and encode settings
    render: RenderSpec,
    /// Default narration voice
    narration: NarrationConfig,
    /// Log output
    logging: LoggingConfig,
}

impl ReelsmithConfig {
    /// Load configuration with precedence (later sources override earlier):
    ///
    /// 1. Bundled defaults (`reelsmith.toml` shipped with the crate)
    /// 2. `~/.config/reelsmith/reelsmith.toml`
    /// 3. `./reelsmith.toml`
    /// 4. `REELSMITH__SECTION__KEY` environment variables
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or the merged
    /// configuration fails [`validate`](Self::validate).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reelsmith::ReelsmithConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ReelsmithConfig::load()?;
    /// println!("writing videos to {}", config.paths().output_dir().display());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> ReelsmithResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/reelsmith/reelsmith.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("reelsmith").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder.build())
    }

    /// Load configuration from one file only, falling back to defaults for
    /// anything it leaves out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or fails
    /// validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ReelsmithResult<Self> {
        debug!("Loading configuration from file");
        let built = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;
        Self::finish(Ok(built))
    }

    /// The bundled defaults, with no user overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the bundled file is malformed.
    pub fn bundled() -> ReelsmithResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .build(),
        )
    }

    fn finish(built: Result<Config, ::config::ConfigError>) -> ReelsmithResult<Self> {
        let config: Self = built
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for zero retry attempts, an invalid render
    /// section, or a non-positive narration speed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if *self.retry.max_attempts() < 1 {
            return Err(ConfigError::invalid("retry.max_attempts", "must be at least 1"));
        }
        self.render.validate()?;
        let speed = *self.narration.speed();
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::invalid(
                "narration.speed",
                format!("{} must be greater than zero", speed),
            ));
        }
        Ok(())
    }

    /// Replace the paths section.
    pub fn with_paths(mut self, paths: PathsConfig) -> Self {
        self.paths = paths;
        self
    }

    /// Replace the render section.
    pub fn with_render(mut self, render: RenderSpec) -> Self {
        self.render = render;
        self
    }

    /// Replace the retry section.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the providers section.
    pub fn with_providers(mut self, providers: ProviderSettings) -> Self {
        self.providers = providers;
        self
    }
}
