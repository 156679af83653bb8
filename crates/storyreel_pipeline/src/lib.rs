//! Story generation pipeline and playback for Storyreel.
//!
//! - [`Orchestrator`] drives a provider through script, audio, image and video
//!   generation for every scene, then hands the story to playback.
//! - [`PlaybackController`] is the linear scene pointer used while playing.
//! - [`ScenePlayer`] renders scenes through a [`MediaSurface`] and advances
//!   the story when each clip ends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod orchestrator;
mod playback;
mod player;
mod settings;

pub use orchestrator::{
    INVALID_CREDENTIAL_MESSAGE, MISSING_CREDENTIAL_MESSAGE, Orchestrator,
};
pub use playback::{PlaybackController, PlaybackStep};
pub use player::{MediaSurface, ScenePlayer};
pub use settings::{PlaybackSettings, PlaybackSettingsBuilder};
