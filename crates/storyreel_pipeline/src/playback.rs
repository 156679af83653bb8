//! Linear scene pointer for playback.

use storyreel_error::{PipelineError, PipelineErrorKind};
use tracing::debug;

/// Outcome of [`PlaybackController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackStep {
    /// The pointer moved to this scene index
    Advanced(usize),
    /// The last scene finished and the pointer was cleared
    Finished,
}

/// Scene pointer over a finished story.
///
/// Playback only moves forward: no looping, seeking or going back.
///
/// # Examples
///
/// ```
/// use storyreel_pipeline::{PlaybackController, PlaybackStep};
///
/// let mut playback = PlaybackController::default();
/// playback.start(2).unwrap();
/// assert_eq!(playback.advance().unwrap(), PlaybackStep::Advanced(1));
/// assert_eq!(playback.advance().unwrap(), PlaybackStep::Finished);
/// assert_eq!(playback.current(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackController {
    current: Option<usize>,
    scene_count: usize,
}

impl PlaybackController {
    /// Point at the first of `scene_count` scenes.
    #[track_caller]
    pub fn start(&mut self, scene_count: usize) -> Result<(), PipelineError> {
        if scene_count == 0 {
            return Err(PipelineError::new(PipelineErrorKind::EmptyStory));
        }
        self.scene_count = scene_count;
        self.current = Some(0);
        debug!(scene_count, "Playback started");
        Ok(())
    }

    /// Move to the next scene, or finish after the last one.
    #[track_caller]
    pub fn advance(&mut self) -> Result<PlaybackStep, PipelineError> {
        let current = self
            .current
            .ok_or_else(|| PipelineError::new(PipelineErrorKind::NotPlaying))?;

        if current + 1 < self.scene_count {
            self.current = Some(current + 1);
            Ok(PlaybackStep::Advanced(current + 1))
        } else {
            self.reset();
            Ok(PlaybackStep::Finished)
        }
    }

    /// Index of the scene being played.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// True between `start` and the final `advance`.
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Clear the pointer.
    pub fn reset(&mut self) {
        self.current = None;
        self.scene_count = 0;
    }
}
