//! Scene rendering and audio/video synchronization.

use crate::{Orchestrator, PlaybackSettings, PlaybackStep};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use storyreel_core::{MediaHandle, PipelineState, Scene};
use storyreel_error::{PipelineError, PipelineErrorKind, StoryreelResult};
use storyreel_interface::{CredentialSource, Sleeper, StoryProvider, TokioSleeper};
use tracing::{debug, error, info, instrument};

/// Where scenes are rendered: a video element, an audio element and a text
/// overlay.
///
/// The video's own audio track is never heard; the separate speech track is
/// the only audio source.
#[async_trait]
pub trait MediaSurface: Send {
    /// Replace the overlay text. `None` hides the overlay.
    fn set_overlay(&mut self, text: Option<&str>);

    /// Load a scene's clip (muted) and its speech track, if any.
    async fn load(&mut self, video: &MediaHandle, audio: Option<&MediaHandle>)
    -> StoryreelResult<()>;

    /// Start the loaded clip.
    async fn play_video(&mut self) -> StoryreelResult<()>;

    /// Start the loaded speech track.
    async fn play_audio(&mut self) -> StoryreelResult<()>;

    /// Resolve when the clip reaches its natural end.
    async fn wait_video_end(&mut self);
}

/// Plays finished stories through a [`MediaSurface`].
pub struct ScenePlayer<S> {
    surface: S,
    sleeper: Arc<dyn Sleeper>,
    start_delay: Duration,
}

impl<S> std::fmt::Debug for ScenePlayer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenePlayer")
            .field("start_delay", &self.start_delay)
            .finish_non_exhaustive()
    }
}

impl<S: MediaSurface> ScenePlayer<S> {
    /// Player waiting on the tokio timer.
    pub fn new(surface: S, settings: &PlaybackSettings) -> Self {
        Self {
            surface,
            sleeper: Arc::new(TokioSleeper),
            start_delay: settings.start_delay(),
        }
    }

    /// Replace the sleeper used for the start delay.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// The surface scenes are rendered on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Render one scene until its clip ends.
    ///
    /// Media gets a short delay after loading before it is started. A
    /// failure to start either track is logged and playback carries on.
    #[instrument(skip(self, scene), fields(scene = *scene.index()))]
    pub async fn play_scene(&mut self, scene: &Scene) -> StoryreelResult<()> {
        let video = match scene.video() {
            Some(video) if scene.is_playable() => video,
            _ => {
                return Err(
                    PipelineError::new(PipelineErrorKind::SceneNotPlayable(*scene.index())).into(),
                );
            }
        };

        self.surface.set_overlay(scene.overlay_text().as_deref());
        self.surface.load(video, scene.audio()).await?;
        self.sleeper.sleep(self.start_delay).await;

        if let Err(e) = self.surface.play_video().await {
            error!(error = %e, "Failed to start video playback");
        }
        let audio_started = match scene.audio() {
            Some(_) => self.surface.play_audio().await,
            None => Ok(()),
        };
        if let Err(e) = audio_started {
            error!(error = %e, "Failed to start audio playback");
        }

        self.surface.wait_video_end().await;
        debug!("Scene clip ended");
        Ok(())
    }

    /// Render the orchestrator's current scene, then advance exactly once.
    pub async fn play_current<P, C>(
        &mut self,
        orchestrator: &mut Orchestrator<P, C>,
    ) -> StoryreelResult<PlaybackStep>
    where
        P: StoryProvider,
        C: CredentialSource,
    {
        let scene = orchestrator
            .current_scene()
            .ok_or_else(|| PipelineError::new(PipelineErrorKind::NotPlaying))?;
        self.play_scene(scene).await?;
        orchestrator.advance()
    }

    /// Play scenes until the story finishes. Returns the number played.
    #[instrument(skip_all)]
    pub async fn play_story<P, C>(
        &mut self,
        orchestrator: &mut Orchestrator<P, C>,
    ) -> StoryreelResult<usize>
    where
        P: StoryProvider,
        C: CredentialSource,
    {
        let mut played = 0;
        while orchestrator.state() == PipelineState::Playing {
            self.play_current(orchestrator).await?;
            played += 1;
        }
        self.surface.set_overlay(None);
        info!(played, "Playback complete");
        Ok(played)
    }
}
