//! Core data types for Storyreel.
//!
//! This crate provides the story model shared by the provider client, the
//! pipeline orchestrator and the playback layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod media;
mod scene;
mod state;
mod wav;

pub use media::{MediaHandle, MediaKind};
pub use scene::{DialogueLine, Scene, SceneBuilder};
pub use state::{PipelineSnapshot, PipelineState, Progress};
pub use wav::{MAX_PCM_LEN, PcmFormat, WAV_HEADER_LEN, wrap_pcm};
