//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyreel - narrated, animated fairy tales generated with Gemini
#[derive(Parser, Debug)]
#[command(name = "storyreel")]
#[command(about = "Generate and play a narrated, animated fairy tale", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file overriding the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the story, then play it in the terminal
    Generate {
        /// Stop after generation instead of playing the story
        #[arg(long)]
        no_playback: bool,
    },

    /// Select the API key used for generation
    SelectKey,

    /// Show whether a key is available and the pipeline is ready
    Status {
        /// Print the pipeline snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}
