//! Trait definitions for Storyreel.
//!
//! This crate defines the seams between the pipeline and its collaborators:
//! the generative provider, the credential host and the clock used for waits.

mod traits;

pub use traits::{CredentialSource, Sleeper, StoryProvider, TokioSleeper};
