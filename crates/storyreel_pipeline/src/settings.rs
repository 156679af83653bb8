//! Playback timing.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deserializes from the `[playback]` configuration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Milliseconds to wait after loading media before starting it
    start_delay_ms: u64,
    /// Assumed clip length, in seconds, when a surface cannot measure it
    clip_seconds: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            start_delay_ms: 100,
            clip_seconds: 8,
        }
    }
}

impl PlaybackSettings {
    /// Creates a new builder for `PlaybackSettings`.
    pub fn builder() -> PlaybackSettingsBuilder {
        PlaybackSettingsBuilder::default()
    }

    /// Delay between loading a scene's media and starting it.
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    /// Fallback clip length.
    pub fn clip_duration(&self) -> Duration {
        Duration::from_secs(self.clip_seconds)
    }
}
