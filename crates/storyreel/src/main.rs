//! Storyreel CLI binary.
//!
//! - `generate`: build the story scene by scene, then play it in the terminal
//! - `select-key`: pick the API key for this session
//! - `status`: show credential and model configuration

use clap::Parser;
use std::process::ExitCode;
use storyreel::observability::{LogFormat, LoggingConfig, init_logging};
use storyreel::{PipelineState, StoryreelConfig};

mod cli;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate_story, select_key, show_status};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    let _guard = init_logging(&LoggingConfig::new(cli.verbose, format))?;

    let config = match &cli.config {
        Some(path) => StoryreelConfig::from_file(path)?,
        None => StoryreelConfig::load()?,
    };

    match cli.command {
        Commands::Generate { no_playback } => {
            let state = generate_story(&config, no_playback).await?;
            if matches!(state, PipelineState::Failed | PipelineState::AwaitingCredential) {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::SelectKey => {
            select_key(&config).await?;
        }

        Commands::Status { json } => {
            show_status(&config, json).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
