//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// reelsmith - turn a scene blueprint into a narrated video
#[derive(Parser, Debug)]
#[command(name = "reelsmith")]
#[command(about = "Turn a scene blueprint into a narrated video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true, env = "REELSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Trace id attached to every log line (a random id when unset)
    #[arg(long, global = true)]
    pub trace_id: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Produce assets and assemble the final video
    Render {
        /// Path to the blueprint JSON file
        #[arg(long)]
        blueprint: PathBuf,

        /// Voice id overriding the configured narration voice
        #[arg(long)]
        voice: Option<String>,
    },

    /// Produce assets only and print the manifest
    Produce {
        /// Path to the blueprint JSON file
        #[arg(long)]
        blueprint: PathBuf,

        /// Voice id overriding the configured narration voice
        #[arg(long)]
        voice: Option<String>,
    },
}
