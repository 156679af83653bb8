//! Layered configuration loading.

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyreel_error::{ConfigError, StoryreelError, StoryreelResult};
use storyreel_models::GeminiSettings;
use storyreel_pipeline::PlaybackSettings;
use tracing::{debug, instrument};

// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../storyreel.toml");

/// Top-level Storyreel configuration.
///
/// Sources in order of precedence (later sources override earlier):
/// 1. Bundled defaults (`storyreel.toml` shipped with the crate)
/// 2. `~/.config/storyreel/storyreel.toml`
/// 3. `./storyreel.toml`
///
/// # Example
///
/// ```no_run
/// use storyreel::StoryreelConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryreelConfig::load()?;
/// println!("Script model: {}", config.gemini.script_model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryreelConfig {
    /// Gemini endpoint, models and polling
    #[serde(default)]
    pub gemini: GeminiSettings,
    /// Playback timing
    #[serde(default)]
    pub playback: PlaybackSettings,
}

impl StoryreelConfig {
    /// Load with the standard precedence. Missing user files are skipped.
    #[instrument]
    pub fn load() -> StoryreelResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config/storyreel/storyreel.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyreel").required(false));

        Self::finish(builder)
    }

    /// Load bundled defaults overridden by one explicit file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        debug!("Loading configuration from file");

        if !path.as_ref().is_file() {
            return Err(ConfigError::new(format!(
                "Configuration file not found: {}",
                path.as_ref().display()
            ))
            .into());
        }

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load bundled defaults overridden by TOML text.
    pub fn from_toml_str(toml: &str) -> StoryreelResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
    ) -> StoryreelResult<Self> {
        builder
            .build()
            .map_err(|e| {
                StoryreelError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryreelError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
