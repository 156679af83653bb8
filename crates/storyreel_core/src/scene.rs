//! Story scenes and their generated media.

use crate::{MediaHandle, MediaKind};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyreel_error::{PipelineError, PipelineErrorKind};

/// One spoken line attributed to a character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct DialogueLine {
    /// Character speaking the line
    speaker: String,
    /// Spoken text
    line: String,
}

impl DialogueLine {
    /// Create a dialogue line.
    pub fn new(speaker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.into(),
        }
    }
}

/// One unit of story content.
///
/// Scenes are created as drafts by script generation. Media handles are then
/// attached one stage at a time and are never replaced within a run.
///
/// A scene is normally playable only once both its audio and video handles are
/// set. A scene with no narration and no dialogue is the one deliberate
/// exception: it never receives audio, so its video alone makes it playable
/// (see [`Scene::is_playable`]).
///
/// # Examples
///
/// ```
/// use storyreel_core::{DialogueLine, Scene};
///
/// let scene = Scene::builder()
///     .index(1u32)
///     .description_english("A farmer in a rice field")
///     .narration("Once upon a time...")
///     .dialogue(vec![DialogueLine::new("Anh Khoai", "I will work hard.")])
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     scene.overlay_text().as_deref(),
///     Some("Once upon a time...\nAnh Khoai: I will work hard.")
/// );
/// assert!(!scene.is_playable());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Getters)]
#[builder(setter(into), default)]
pub struct Scene {
    /// Ordinal assigned by the script; defines playback order
    index: u32,
    /// Scene description in the story's language
    description_native: String,
    /// English description, used as the image and video prompt
    description_english: String,
    /// Narrator text, possibly empty
    narration: String,
    /// Character lines in speaking order
    dialogue: Vec<DialogueLine>,
    #[builder(setter(skip))]
    #[getter(skip)]
    image: Option<MediaHandle>,
    #[builder(setter(skip))]
    #[getter(skip)]
    audio: Option<MediaHandle>,
    #[builder(setter(skip))]
    #[getter(skip)]
    video: Option<MediaHandle>,
}

impl Scene {
    /// Creates a new builder for `Scene`.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Generated illustration, once attached.
    pub fn image(&self) -> Option<&MediaHandle> {
        self.image.as_ref()
    }

    /// Generated speech, once attached.
    pub fn audio(&self) -> Option<&MediaHandle> {
        self.audio.as_ref()
    }

    /// Generated clip, once attached.
    pub fn video(&self) -> Option<&MediaHandle> {
        self.video.as_ref()
    }

    /// True when the scene has narration or dialogue to speak.
    pub fn has_spoken_text(&self) -> bool {
        !self.narration.is_empty() || !self.dialogue.is_empty()
    }

    /// Attach the speech track.
    #[track_caller]
    pub fn attach_audio(&mut self, handle: MediaHandle) -> Result<(), PipelineError> {
        Self::attach(self.index, &mut self.audio, MediaKind::Audio, handle)
    }

    /// Attach the illustration.
    #[track_caller]
    pub fn attach_image(&mut self, handle: MediaHandle) -> Result<(), PipelineError> {
        Self::attach(self.index, &mut self.image, MediaKind::Image, handle)
    }

    /// Attach the clip. The image it was seeded from must already be attached.
    #[track_caller]
    pub fn attach_video(&mut self, handle: MediaHandle) -> Result<(), PipelineError> {
        if self.image.is_none() {
            return Err(PipelineError::new(PipelineErrorKind::VideoBeforeImage(
                self.index,
            )));
        }
        Self::attach(self.index, &mut self.video, MediaKind::Video, handle)
    }

    #[track_caller]
    fn attach(
        index: u32,
        slot: &mut Option<MediaHandle>,
        kind: MediaKind,
        handle: MediaHandle,
    ) -> Result<(), PipelineError> {
        if slot.is_some() {
            return Err(PipelineError::new(PipelineErrorKind::HandleAlreadySet {
                scene: index,
                media: kind.to_string(),
            }));
        }
        *slot = Some(handle);
        Ok(())
    }

    /// True when the scene can be handed to a player.
    ///
    /// A video is always required. Audio is required unless the scene has no
    /// spoken text, in which case it plays silently.
    pub fn is_playable(&self) -> bool {
        self.video.is_some() && (self.audio.is_some() || !self.has_spoken_text())
    }

    /// Subtitle overlay: narration, then one `speaker: line` entry per dialogue
    /// line, newline separated. `None` when there is nothing to show.
    pub fn overlay_text(&self) -> Option<String> {
        let entries: Vec<String> = std::iter::once(self.narration.clone())
            .chain(
                self.dialogue
                    .iter()
                    .map(|d| format!("{}: {}", d.speaker, d.line)),
            )
            .filter(|entry| !entry.is_empty())
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(entries.join("\n"))
        }
    }
}
