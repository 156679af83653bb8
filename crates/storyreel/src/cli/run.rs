//! Command handlers.

use std::sync::Arc;
use storyreel::terminal::{StatusPrinter, TerminalCredentials, TerminalSurface};
use storyreel::{
    CredentialSource, GeminiStoryClient, JsonError, Orchestrator, PipelineState, ScenePlayer,
    StoryProvider, StoryreelConfig, StoryreelResult,
};
use tracing::{info, instrument};

fn credentials(config: &StoryreelConfig) -> Arc<TerminalCredentials> {
    Arc::new(TerminalCredentials::new(config.gemini.api_key_env()))
}

/// Generate the story and, unless `no_playback` is set, play it.
///
/// Returns the state the pipeline ended in.
#[instrument(skip(config))]
pub async fn generate_story(
    config: &StoryreelConfig,
    no_playback: bool,
) -> StoryreelResult<PipelineState> {
    let credentials = credentials(config);
    let client = GeminiStoryClient::new(config.gemini.clone(), Arc::clone(&credentials))?;
    let mut orchestrator = Orchestrator::new(client, credentials);

    let printer = StatusPrinter::spawn(orchestrator.subscribe(), std::io::stdout());

    if !orchestrator.refresh_credential().await? {
        orchestrator.select_credential().await?;
    }

    let mut state = orchestrator.start().await?;
    if state == PipelineState::Playing {
        info!(
            scenes = orchestrator.scenes().len(),
            provider = orchestrator.provider().provider_name(),
            "Story generated"
        );
        if no_playback {
            println!("Generated {} scenes.", orchestrator.scenes().len());
        } else {
            let surface = TerminalSurface::stdout(&config.playback);
            let mut player = ScenePlayer::new(surface, &config.playback);
            player.play_story(&mut orchestrator).await?;
            state = orchestrator.state();
        }
    } else if let Some(error) = orchestrator.error() {
        eprintln!("{error}");
    }

    drop(orchestrator);
    // The printer ends once the orchestrator's sender is gone.
    printer.finish().await;
    Ok(state)
}

/// Prompt for an API key unless one is already configured.
#[instrument(skip(config))]
pub async fn select_key(config: &StoryreelConfig) -> StoryreelResult<()> {
    let credentials = credentials(config);
    credentials.select_credential().await?;
    if credentials.has_credential().await {
        println!("API key selected.");
    }
    Ok(())
}

/// Print the readiness of the pipeline.
#[instrument(skip(config))]
pub async fn show_status(config: &StoryreelConfig, json: bool) -> StoryreelResult<()> {
    let credentials = credentials(config);
    let client = GeminiStoryClient::new(config.gemini.clone(), Arc::clone(&credentials))?;
    let mut orchestrator = Orchestrator::new(client, credentials);
    orchestrator.refresh_credential().await?;

    let snapshot = orchestrator.snapshot();
    if json {
        let text = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| JsonError::new(format!("Failed to serialize status: {}", e)))?;
        println!("{text}");
    } else {
        println!("{}", snapshot.status_message());
        println!("Script model: {}", config.gemini.script_model());
        println!("Speech model: {}", config.gemini.speech_model());
        println!("Image model:  {}", config.gemini.image_model());
        println!("Video model:  {}", config.gemini.video_model());
    }
    Ok(())
}
