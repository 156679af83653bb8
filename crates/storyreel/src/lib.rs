//! Storyreel - narrated, animated fairy tales generated scene by scene.
//!
//! Storyreel asks a generative provider for a story script, then produces
//! speech, an illustration and a short clip for every scene, and finally plays
//! the scenes back in order with subtitles.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyreel::{
//!     EnvCredentials, GeminiStoryClient, Orchestrator, PipelineState, StoryreelConfig,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryreelConfig::load()?;
//! let credentials = EnvCredentials::new(config.gemini.api_key_env());
//! let client = GeminiStoryClient::new(config.gemini.clone(), credentials.clone())?;
//!
//! let mut orchestrator = Orchestrator::new(client, credentials);
//! if orchestrator.start().await? == PipelineState::Playing {
//!     println!("{} scenes ready", orchestrator.scenes().len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - export tracing spans through OpenTelemetry (stdout)
//!
//! # Architecture
//!
//! - `storyreel_error` - error types
//! - `storyreel_core` - scenes, media handles, pipeline states, WAV wrapping
//! - `storyreel_interface` - provider, credential and sleeper traits
//! - `storyreel_models` - Gemini client and credential sources
//! - `storyreel_pipeline` - orchestrator, playback controller, scene player
//!
//! This crate re-exports all of them and adds configuration loading, logging
//! setup and a terminal front end.

mod config;
pub mod observability;
pub mod terminal;

pub use config::StoryreelConfig;

pub use storyreel_core::*;
pub use storyreel_error::*;
pub use storyreel_interface::*;
pub use storyreel_models::{
    EnvCredentials, GeminiSettings, GeminiSettingsBuilder, GeminiStoryClient, StaticCredentials,
    is_credential_rejection, reclassify_rejection,
};
pub use storyreel_pipeline::*;
