//! Speech transcripts and voice assignment.

use super::dto::SpeakerVoiceConfig;
use storyreel_core::Scene;

/// Speaker label used for narration lines.
pub const NARRATOR: &str = "Người dẫn chuyện";

/// Voice for speakers without a dedicated one.
pub const DEFAULT_VOICE: &str = "Kore";

const VOICES: &[(&str, &str)] = &[
    (NARRATOR, "Kore"),
    ("Anh Khoai", "Puck"),
    ("Phú ông", "Fenrir"),
    ("Bụt", "Zephyr"),
];

const TRANSCRIPT_HEADER: &str = "TTS the following conversation:\n";

/// Prebuilt voice for a speaker label.
///
/// # Examples
///
/// ```
/// use storyreel_models::gemini::speech::{DEFAULT_VOICE, voice_for};
///
/// assert_eq!(voice_for("Bụt"), "Zephyr");
/// assert_eq!(voice_for("Con gái phú ông"), DEFAULT_VOICE);
/// ```
pub fn voice_for(speaker: &str) -> &'static str {
    VOICES
        .iter()
        .find(|(name, _)| *name == speaker)
        .map(|(_, voice)| *voice)
        .unwrap_or(DEFAULT_VOICE)
}

/// Speech prompt for one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    prompt: String,
    speakers: Vec<String>,
}

impl Transcript {
    /// Build the transcript for `scene`: narration first, then each dialogue
    /// line. `None` when the scene has nothing to speak.
    pub fn for_scene(scene: &Scene) -> Option<Self> {
        let mut prompt = TRANSCRIPT_HEADER.to_string();
        let mut speakers: Vec<String> = Vec::new();
        let mut push = |speaker: &str, line: &str| {
            prompt.push_str(&format!("{speaker}: {line}\n"));
            if !speakers.iter().any(|s| s == speaker) {
                speakers.push(speaker.to_string());
            }
        };

        if !scene.narration().is_empty() {
            push(NARRATOR, scene.narration());
        }
        for dialogue in scene.dialogue() {
            push(dialogue.speaker(), dialogue.line());
        }

        if speakers.is_empty() {
            None
        } else {
            Some(Self { prompt, speakers })
        }
    }

    /// Full prompt text sent to the speech model.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Distinct speakers in order of first appearance.
    pub fn speakers(&self) -> &[String] {
        &self.speakers
    }

    /// One voice assignment per distinct speaker.
    pub fn voice_configs(&self) -> Vec<SpeakerVoiceConfig> {
        self.speakers
            .iter()
            .map(|speaker| SpeakerVoiceConfig::new(speaker.clone(), voice_for(speaker)))
            .collect()
    }
}
