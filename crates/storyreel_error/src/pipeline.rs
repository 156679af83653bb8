//! Pipeline and playback state errors.

/// Misuse of the pipeline state machine or the scene model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// The requested state change is not in the transition table
    #[display("Invalid pipeline transition from {} to {}", from, to)]
    InvalidTransition {
        /// State the pipeline was in
        from: String,
        /// State that was requested
        to: String,
    },
    /// Playback was requested for a story without scenes
    #[display("Story has no scenes to play")]
    EmptyStory,
    /// Playback was advanced while nothing is playing
    #[display("Playback is not running")]
    NotPlaying,
    /// A media handle was attached twice to the same scene
    #[display("Scene {} already has a {} handle", scene, media)]
    HandleAlreadySet {
        /// Scene ordinal
        scene: u32,
        /// Media kind name
        media: String,
    },
    /// A video handle was attached before the scene's image
    #[display("Scene {} has no image to seed its video", _0)]
    VideoBeforeImage(u32),
    /// The scene lacks the media required for playback
    #[display("Scene {} is not ready for playback", _0)]
    SceneNotPlayable(u32),
}

/// Pipeline error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyreel_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyStory);
/// assert_eq!(err.kind(), &PipelineErrorKind::EmptyStory);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    kind: PipelineErrorKind,
    line: u32,
    file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PipelineErrorKind {
        &self.kind
    }
}
