//! Tracing subscriber setup for the binary.

use crate::{LogFormat, LoggingConfig};
use reelsmith_error::ConfigError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,reelsmith=debug";

/// Install the global subscriber.
///
/// `RUST_LOG` takes priority over the default filter. `verbose` raises the
/// default to debug for everything. Logs go to stderr so stdout stays free
/// for command output.
///
/// # Errors
///
/// Returns [`ConfigError`] if a global subscriber is already installed.
pub fn init_tracing(logging: &LoggingConfig, verbose: bool) -> Result<(), ConfigError> {
    let default_filter = if verbose { "debug" } else { DEFAULT_FILTER };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match logging.format() {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| ConfigError::new(format!("Failed to initialize tracing: {}", e)))
}
