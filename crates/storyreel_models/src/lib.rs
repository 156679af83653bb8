//! Generative provider integrations for Storyreel.
//!
//! [`GeminiStoryClient`] produces every asset of a story from the Gemini API
//! family: a schema-constrained script, multi-speaker speech, Imagen
//! illustrations and Veo clips.
//!
//! Credentials come from a [`CredentialSource`](storyreel_interface::CredentialSource);
//! [`EnvCredentials`] and [`StaticCredentials`] are provided here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
pub mod gemini;

pub use credentials::{
    EnvCredentials, StaticCredentials, is_credential_rejection, reclassify_rejection,
};
pub use gemini::{GeminiSettings, GeminiSettingsBuilder, GeminiStoryClient};
