//! Pipeline state machine vocabulary.

use serde::{Deserialize, Serialize};

/// Stage of a generation run. Exactly one is active at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineState {
    /// Ready to start a run
    #[default]
    #[display("idle")]
    Idle,
    /// Waiting for the user to select a credential
    #[display("awaiting-credential")]
    AwaitingCredential,
    /// Requesting the story script
    #[display("generating-script")]
    GeneratingScript,
    /// Synthesizing speech for the current scene
    #[display("generating-audio")]
    GeneratingAudio,
    /// Generating the current scene's illustration
    #[display("generating-image")]
    GeneratingImage,
    /// Generating the current scene's clip
    #[display("generating-video")]
    GeneratingVideo,
    /// Playing back the finished story
    #[display("playing")]
    Playing,
    /// The last run stopped on an error
    #[display("failed")]
    Failed,
}

impl PipelineState {
    /// True for the four stages that issue provider requests.
    pub fn is_generating(&self) -> bool {
        matches!(
            self,
            PipelineState::GeneratingScript
                | PipelineState::GeneratingAudio
                | PipelineState::GeneratingImage
                | PipelineState::GeneratingVideo
        )
    }

    /// True when a new run may be started from this state.
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            PipelineState::Idle | PipelineState::Failed | PipelineState::AwaitingCredential
        )
    }

    /// Transition table of the pipeline.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyreel_core::PipelineState;
    ///
    /// assert!(PipelineState::GeneratingVideo.can_transition_to(PipelineState::Playing));
    /// assert!(!PipelineState::Idle.can_transition_to(PipelineState::Playing));
    /// ```
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        match (self, next) {
            (Idle | Failed | AwaitingCredential, AwaitingCredential | GeneratingScript) => true,
            (AwaitingCredential, Idle) => true,
            (GeneratingScript, GeneratingAudio | Failed | AwaitingCredential) => true,
            (GeneratingAudio, GeneratingImage | Failed | AwaitingCredential) => true,
            (GeneratingImage, GeneratingVideo | Failed | AwaitingCredential) => true,
            (GeneratingVideo, GeneratingAudio | Playing | Failed | AwaitingCredential) => true,
            (Playing, Idle) => true,
            _ => false,
        }
    }

    /// One-line status for the presentation layer.
    pub fn status_message(&self, progress: Progress, error: Option<&str>) -> String {
        match self {
            PipelineState::Idle => "Ready to create your story".to_string(),
            PipelineState::AwaitingCredential => "Please select your API Key to begin.".to_string(),
            PipelineState::GeneratingScript => "Generating story script...".to_string(),
            PipelineState::GeneratingAudio => format!("Generating audio for scene {progress}..."),
            PipelineState::GeneratingImage => format!("Generating image for scene {progress}..."),
            PipelineState::GeneratingVideo => format!("Generating video for scene {progress}..."),
            PipelineState::Playing => "Playing your story...".to_string(),
            PipelineState::Failed => format!("Error: {}", error.unwrap_or_default()),
        }
    }
}

/// Position of the scene being processed out of the script's scene count.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{}/{}", current, total)]
pub struct Progress {
    /// 1-based position of the current scene, 0 before the first scene starts
    pub current: usize,
    /// Number of scenes in the script
    pub total: usize,
}

impl Progress {
    /// Create a progress value.
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }
}

/// What observers see of the pipeline after each change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    /// Active stage
    pub state: PipelineState,
    /// Scene progress, meaningful while generating
    pub progress: Progress,
    /// Last error message, shown verbatim
    pub error: Option<String>,
    /// Scene being played, while playing
    pub current_scene: Option<usize>,
}

impl PipelineSnapshot {
    /// Status line for this snapshot.
    pub fn status_message(&self) -> String {
        self.state
            .status_message(self.progress, self.error.as_deref())
    }
}
