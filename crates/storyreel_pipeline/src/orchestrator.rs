//! Generation pipeline driver.

use crate::{PlaybackController, PlaybackStep};
use storyreel_core::{PipelineSnapshot, PipelineState, Progress, Scene};
use storyreel_error::{
    GenerationErrorKind, PipelineError, PipelineErrorKind, StoryreelError, StoryreelResult,
};
use storyreel_interface::{CredentialSource, StoryProvider};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Shown when a run is requested without a selected credential.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please select an API key first.";

/// Shown when the provider rejects the selected credential.
pub const INVALID_CREDENTIAL_MESSAGE: &str = "API Key is invalid. Please select a valid key.";

/// Drives a [`StoryProvider`] through a full story run and owns the result.
///
/// Requests are issued one at a time. Every state, progress or error change
/// is published as a [`PipelineSnapshot`] on the channel returned by
/// [`subscribe`](Self::subscribe).
///
/// Generation failures do not surface as `Err` from [`start`](Self::start):
/// they end the run in [`PipelineState::Failed`] or
/// [`PipelineState::AwaitingCredential`] with the message in
/// [`error`](Self::error). `Err` is reserved for misuse, such as starting a
/// run while one is playing.
pub struct Orchestrator<P, C> {
    provider: P,
    credentials: C,
    state: PipelineState,
    progress: Progress,
    scenes: Vec<Scene>,
    error: Option<String>,
    credential_available: bool,
    playback: PlaybackController,
    snapshots: watch::Sender<PipelineSnapshot>,
}

impl<P, C> std::fmt::Debug for Orchestrator<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("scenes", &self.scenes.len())
            .field("error", &self.error)
            .field("credential_available", &self.credential_available)
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}

impl<P, C> Orchestrator<P, C>
where
    P: StoryProvider,
    C: CredentialSource,
{
    /// Create an idle orchestrator.
    pub fn new(provider: P, credentials: C) -> Self {
        let (snapshots, _) = watch::channel(PipelineSnapshot::default());
        Self {
            provider,
            credentials,
            state: PipelineState::Idle,
            progress: Progress::default(),
            scenes: Vec::new(),
            error: None,
            credential_available: false,
            playback: PlaybackController::default(),
            snapshots,
        }
    }

    /// Receive a snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.snapshots.subscribe()
    }

    /// Current observable state.
    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            state: self.state,
            progress: self.progress,
            error: self.error.clone(),
            current_scene: self.playback.current(),
        }
    }

    /// Active stage.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Scene progress of the current or last run.
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Scenes of the current or last run, in playback order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Last error message, shown verbatim.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Credential availability as of the last check.
    pub fn credential_available(&self) -> bool {
        self.credential_available
    }

    /// Index of the scene being played.
    pub fn current_scene_index(&self) -> Option<usize> {
        self.playback.current()
    }

    /// Scene being played.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.playback.current().and_then(|i| self.scenes.get(i))
    }

    /// The provider generating assets.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Re-check the credential without starting a run.
    ///
    /// From `Idle` a missing credential moves to `AwaitingCredential`; from
    /// `AwaitingCredential` a present one moves back to `Idle`. Other states
    /// only update the availability flag.
    #[instrument(skip(self))]
    pub async fn refresh_credential(&mut self) -> StoryreelResult<bool> {
        self.credential_available = self.credentials.has_credential().await;
        debug!(available = self.credential_available, "Credential checked");

        match (self.state, self.credential_available) {
            (PipelineState::Idle, false) => self.transition(PipelineState::AwaitingCredential)?,
            (PipelineState::AwaitingCredential, true) => {
                self.error = None;
                self.transition(PipelineState::Idle)?
            }
            _ => self.publish(),
        }
        Ok(self.credential_available)
    }

    /// Ask the credential source to prompt for a key.
    ///
    /// Whether the user actually picked one cannot be observed, so success is
    /// assumed. A rejected key surfaces again on the next run.
    #[instrument(skip(self))]
    pub async fn select_credential(&mut self) -> StoryreelResult<()> {
        self.credentials.select_credential().await?;
        self.credential_available = true;
        info!("Credential selected");

        if self.state == PipelineState::AwaitingCredential {
            self.error = None;
            self.transition(PipelineState::Idle)?;
        } else {
            self.publish();
        }
        Ok(())
    }

    /// Run the whole pipeline: script, then audio, image and video per scene,
    /// then playback.
    ///
    /// Returns the state the run ended in: `Playing` on success,
    /// `AwaitingCredential` when the credential is missing or rejected,
    /// `Failed` otherwise. Previous scenes are always discarded.
    #[instrument(skip(self), fields(provider = self.provider.provider_name()))]
    pub async fn start(&mut self) -> StoryreelResult<PipelineState> {
        if !self.state.can_start() {
            return Err(self.invalid_transition(PipelineState::GeneratingScript).into());
        }

        self.credential_available = self.credentials.has_credential().await;
        if !self.credential_available {
            warn!("Run requested without a credential");
            self.error = Some(MISSING_CREDENTIAL_MESSAGE.to_string());
            self.transition(PipelineState::AwaitingCredential)?;
            return Ok(self.state);
        }

        self.scenes.clear();
        self.progress = Progress::default();
        self.error = None;
        self.playback.reset();

        let run_id = Uuid::new_v4();
        if let Err(err) = self.run(run_id).await {
            self.route_failure(err)?;
        }
        Ok(self.state)
    }

    /// Move playback to the next scene. Finishing the last scene returns the
    /// pipeline to `Idle`.
    #[track_caller]
    pub fn advance(&mut self) -> StoryreelResult<PlaybackStep> {
        if self.state != PipelineState::Playing {
            return Err(PipelineError::new(PipelineErrorKind::NotPlaying).into());
        }

        let step = self.playback.advance()?;
        match step {
            PlaybackStep::Advanced(index) => {
                debug!(scene = index, "Playback advanced");
                self.publish();
            }
            PlaybackStep::Finished => {
                info!("Story finished");
                self.transition(PipelineState::Idle)?;
            }
        }
        Ok(step)
    }

    #[instrument(skip_all, fields(run_id = %run_id))]
    async fn run(&mut self, run_id: Uuid) -> StoryreelResult<()> {
        self.transition(PipelineState::GeneratingScript)?;
        info!("Generating story script");
        let scenes = self.provider.generate_script().await?;
        if scenes.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyStory).into());
        }

        let total = scenes.len();
        self.scenes = scenes;
        self.progress = Progress::new(0, total);
        self.publish();
        info!(total, "Script ready");

        for i in 0..total {
            self.generate_scene(i).await?;
        }

        if let Some(scene) = self.scenes.iter().find(|scene| !scene.is_playable()) {
            return Err(PipelineError::new(PipelineErrorKind::SceneNotPlayable(*scene.index())).into());
        }

        self.transition(PipelineState::Playing)?;
        self.playback.start(total)?;
        self.publish();
        info!(total, "Story ready, playing");
        Ok(())
    }

    async fn generate_scene(&mut self, i: usize) -> StoryreelResult<()> {
        self.progress.current = i + 1;
        let total = self.progress.total;

        self.transition(PipelineState::GeneratingAudio)?;
        info!(scene = i + 1, total, "Generating audio");
        if let Some(audio) = self.provider.generate_audio(&self.scenes[i]).await? {
            self.scenes[i].attach_audio(audio)?;
        } else {
            debug!(scene = i + 1, "Scene is silent");
        }

        self.transition(PipelineState::GeneratingImage)?;
        info!(scene = i + 1, total, "Generating image");
        let image = self
            .provider
            .generate_image(self.scenes[i].description_english())
            .await?;
        self.scenes[i].attach_image(image)?;

        self.transition(PipelineState::GeneratingVideo)?;
        info!(scene = i + 1, total, "Generating video");
        let scene = &self.scenes[i];
        let image = scene
            .image()
            .ok_or_else(|| PipelineError::new(PipelineErrorKind::VideoBeforeImage(*scene.index())))?;
        let video = self
            .provider
            .generate_video(scene.description_english(), image)
            .await?;
        self.scenes[i].attach_video(video)?;
        Ok(())
    }

    fn route_failure(&mut self, err: StoryreelError) -> StoryreelResult<()> {
        match err.generation().map(|g| g.kind()) {
            Some(GenerationErrorKind::CredentialInvalid(message)) => {
                warn!(provider_message = %message, "Credential rejected, aborting run");
                self.credential_available = false;
                self.error = Some(INVALID_CREDENTIAL_MESSAGE.to_string());
                self.transition(PipelineState::AwaitingCredential)?;
            }
            Some(GenerationErrorKind::CredentialMissing) => {
                warn!("Credential disappeared during run");
                self.credential_available = false;
                self.error = Some(MISSING_CREDENTIAL_MESSAGE.to_string());
                self.transition(PipelineState::AwaitingCredential)?;
            }
            _ => {
                error!(error = %err, state = %self.state, "Run failed");
                self.error = Some(format!("An error occurred: {}", err.user_message()));
                self.transition(PipelineState::Failed)?;
            }
        }
        Ok(())
    }

    #[track_caller]
    fn transition(&mut self, next: PipelineState) -> Result<(), PipelineError> {
        if !self.state.can_transition_to(next) {
            return Err(self.invalid_transition(next));
        }
        debug!(from = %self.state, to = %next, "Pipeline transition");
        self.state = next;
        self.publish();
        Ok(())
    }

    #[track_caller]
    fn invalid_transition(&self, next: PipelineState) -> PipelineError {
        PipelineError::new(PipelineErrorKind::InvalidTransition {
            from: self.state.to_string(),
            to: next.to_string(),
        })
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}
