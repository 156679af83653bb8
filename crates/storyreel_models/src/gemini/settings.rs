//! Gemini endpoint and model selection.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint, models and polling cadence used by [`GeminiStoryClient`](super::GeminiStoryClient).
///
/// Deserializes from the `[gemini]` configuration table; every field is
/// optional and falls back to the defaults below.
///
/// ```toml
/// [gemini]
/// script_model = "gemini-2.5-pro"
/// poll_interval_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct GeminiSettings {
    /// API root, without trailing slash
    base_url: String,
    /// Model producing the story script
    script_model: String,
    /// Multi-speaker text-to-speech model
    speech_model: String,
    /// Image generation model
    image_model: String,
    /// Image-seeded video generation model
    video_model: String,
    /// Seconds between video operation status checks
    poll_interval_secs: u64,
    /// Environment variable holding the API key
    api_key_env: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            script_model: "gemini-2.5-pro".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            video_model: "veo-3.1-fast-generate-preview".to_string(),
            poll_interval_secs: 10,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl GeminiSettings {
    /// Creates a new builder for `GeminiSettings`.
    pub fn builder() -> GeminiSettingsBuilder {
        GeminiSettingsBuilder::default()
    }

    /// Interval between video operation status checks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// URL of a model method, e.g. `models/gemini-2.5-pro:generateContent`.
    pub fn model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    /// URL of a long-running operation resource.
    pub fn operation_url(&self, operation_name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            operation_name.trim_start_matches('/')
        )
    }
}
