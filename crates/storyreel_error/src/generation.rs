//! Asset generation errors raised by story providers.

/// Failure conditions of the four provider operations.
///
/// The two credential kinds are recoverable by selecting a new key; every other
/// kind ends the current run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No credential has been selected
    #[display("API key not found")]
    CredentialMissing,
    /// The provider rejected the selected credential
    #[display("API key rejected by provider: {}", _0)]
    CredentialInvalid(String),
    /// The script request itself failed
    #[display("Failed to generate story script: {}", _0)]
    ScriptGenerationFailed(String),
    /// The script response did not match the expected schema
    #[display("Malformed story script: {}", _0)]
    MalformedScript(String),
    /// Speech synthesis returned no audio payload
    #[display("Failed to generate audio: {}", _0)]
    AudioGenerationFailed(String),
    /// Image generation returned no image bytes
    #[display("Failed to generate image: {}", _0)]
    ImageGenerationFailed(String),
    /// The video operation finished without a retrievable result
    #[display("Video generation failed: {}", _0)]
    VideoGenerationFailed(String),
    /// The finished video could not be fetched
    #[display("Failed to download video: {}", _0)]
    VideoDownloadFailed(String),
}

impl GenerationErrorKind {
    /// True for the kinds that route to credential re-selection instead of failure.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::CredentialMissing | GenerationErrorKind::CredentialInvalid(_)
        )
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyreel_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::CredentialMissing);
/// assert!(err.kind.is_credential_error());
/// assert!(format!("{}", err).contains("API key not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}
