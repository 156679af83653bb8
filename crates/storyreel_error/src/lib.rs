//! Error types for Storyreel.
//!
//! This crate provides the foundation error types used throughout the Storyreel workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyreel_error::{GenerationError, GenerationErrorKind, StoryreelResult};
//!
//! fn render_image() -> StoryreelResult<Vec<u8>> {
//!     Err(GenerationError::new(GenerationErrorKind::ImageGenerationFailed(
//!         "no image bytes returned".to_string(),
//!     )))?
//! }
//!
//! assert!(render_image().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod generation;
mod message;
mod pipeline;

pub use error::{StoryreelError, StoryreelErrorKind, StoryreelResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use message::{ConfigError, HttpError, JsonError, SurfaceError};
pub use pipeline::{PipelineError, PipelineErrorKind};
