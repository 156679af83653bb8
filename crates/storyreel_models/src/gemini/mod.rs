//! Google Gemini API story client.
//!
//! One REST client covers the four story assets:
//! - script: `generateContent` with a JSON response schema
//! - speech: `generateContent` with the audio modality and per-speaker voices
//! - illustration: Imagen `predict`
//! - clip: Veo `predictLongRunning`, polled until the operation is done
//!
//! Request and response bodies live in [`dto`].

mod client;
pub mod dto;
mod operation;
pub mod prompts;
pub mod requests;
mod script;
mod settings;
pub mod speech;

pub use client::GeminiStoryClient;
pub use operation::{LongRunning, poll_until_done};
pub use script::parse_script;
pub use settings::{GeminiSettings, GeminiSettingsBuilder};
