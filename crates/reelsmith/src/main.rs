//! reelsmith CLI binary.
//!
//! - `render` produces scene assets and encodes the final video
//! - `produce` produces scene assets and prints the manifest

use clap::Parser;
use reelsmith::{ReelsmithConfig, TraceContext, telemetry};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, produce_blueprint, render_blueprint};

    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReelsmithConfig::from_file(path)?,
        None => ReelsmithConfig::load()?,
    };

    telemetry::init_tracing(config.logging(), cli.verbose)?;

    let ctx = cli
        .trace_id
        .map(TraceContext::with_id)
        .unwrap_or_default();

    match cli.command {
        Commands::Render { blueprint, voice } => {
            render_blueprint(&config, &blueprint, voice, &ctx).await?;
        }
        Commands::Produce { blueprint, voice } => {
            produce_blueprint(&config, &blueprint, voice, &ctx).await?;
        }
    }

    Ok(())
}
