//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, HttpError, JsonError, PipelineError, SurfaceError};

/// Every error condition a Storyreel operation can produce.
///
/// # Examples
///
/// ```
/// use storyreel_error::{HttpError, StoryreelError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StoryreelError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryreelErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Playback surface or prompt error
    #[from(SurfaceError)]
    Surface(SurfaceError),
    /// Provider operation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Pipeline state error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Storyreel error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyreel Error: {}", _0)]
pub struct StoryreelError(Box<StoryreelErrorKind>);

impl StoryreelError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryreelErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryreelErrorKind {
        &self.0
    }

    /// The generation failure wrapped by this error, if any.
    pub fn generation(&self) -> Option<&GenerationError> {
        match self.kind() {
            StoryreelErrorKind::Generation(err) => Some(err),
            _ => None,
        }
    }

    /// Message suitable for showing to the user verbatim.
    ///
    /// Drops the source location that the `Display` form carries.
    pub fn user_message(&self) -> String {
        match self.kind() {
            StoryreelErrorKind::Http(err) => err.message.clone(),
            StoryreelErrorKind::Json(err) => err.message.clone(),
            StoryreelErrorKind::Config(err) => err.message.clone(),
            StoryreelErrorKind::Surface(err) => err.message.clone(),
            StoryreelErrorKind::Generation(err) => err.kind.to_string(),
            StoryreelErrorKind::Pipeline(err) => err.kind().to_string(),
        }
    }
}

// Generic From implementation for any type that converts to StoryreelErrorKind
impl<T> From<T> for StoryreelError
where
    T: Into<StoryreelErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyreel operations.
pub type StoryreelResult<T> = std::result::Result<T, StoryreelError>;
