//! Mock provider, credentials, sleeper and surface for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyreel_core::{DialogueLine, MediaHandle, MediaKind, PcmFormat, Scene, wrap_pcm};
use storyreel_error::{
    GenerationError, GenerationErrorKind, StoryreelResult, SurfaceError,
};
use storyreel_interface::{CredentialSource, Sleeper, StoryProvider};
use storyreel_pipeline::MediaSurface;

/// Provider stage, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Script,
    Audio,
    Image,
    Video,
}

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Script,
    Audio(u32),
    Image(String),
    Video(String),
}

impl Call {
    fn stage(&self) -> Stage {
        match self {
            Call::Script => Stage::Script,
            Call::Audio(_) => Stage::Audio,
            Call::Image(_) => Stage::Image,
            Call::Video(_) => Stage::Video,
        }
    }
}

/// Scripted provider returning fixed scenes and small media payloads.
#[derive(Debug, Default)]
pub struct MockProvider {
    scenes: Vec<Scene>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<(Stage, usize, GenerationErrorKind)>>,
}

impl MockProvider {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            ..Default::default()
        }
    }

    /// Fail the `nth` (0-based) call of `stage` with `kind`.
    pub fn fail_on(self, stage: Stage, nth: usize, kind: GenerationErrorKind) -> Self {
        self.failures.lock().unwrap().push((stage, nth, kind));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.calls().iter().filter(|c| c.stage() == stage).count()
    }

    fn record(&self, call: Call) -> StoryreelResult<()> {
        let stage = call.stage();
        let nth = self.count(stage);
        self.calls.lock().unwrap().push(call);

        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(s, n, _)| *s == stage && *n == nth)
            .map(|(_, _, kind)| kind.clone());
        match failure {
            Some(kind) => Err(GenerationError::new(kind).into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StoryProvider for MockProvider {
    async fn generate_script(&self) -> StoryreelResult<Vec<Scene>> {
        self.record(Call::Script)?;
        Ok(self.scenes.clone())
    }

    async fn generate_audio(&self, scene: &Scene) -> StoryreelResult<Option<MediaHandle>> {
        self.record(Call::Audio(*scene.index()))?;
        if !scene.has_spoken_text() {
            return Ok(None);
        }
        Ok(Some(wrap_pcm(&[0, 0, 1, 0], PcmFormat::SPEECH)?))
    }

    async fn generate_image(&self, prompt: &str) -> StoryreelResult<MediaHandle> {
        self.record(Call::Image(prompt.to_string()))?;
        Ok(MediaHandle::new(MediaKind::Image, "image/jpeg", vec![0xFF, 0xD8]))
    }

    async fn generate_video(
        &self,
        prompt: &str,
        image: &MediaHandle,
    ) -> StoryreelResult<MediaHandle> {
        assert_eq!(image.kind(), &MediaKind::Image);
        self.record(Call::Video(prompt.to_string()))?;
        Ok(MediaHandle::new(MediaKind::Video, "video/mp4", vec![0, 0, 0, 0x18]))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Credential flag the test flips directly.
#[derive(Debug, Default)]
pub struct MockCredentials {
    available: AtomicBool,
    selections: AtomicUsize,
}

impl MockCredentials {
    pub fn available() -> Self {
        let credentials = Self::default();
        credentials.available.store(true, Ordering::SeqCst);
        credentials
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn selections(&self) -> usize {
        self.selections.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialSource for MockCredentials {
    async fn has_credential(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn select_credential(&self) -> StoryreelResult<()> {
        self.selections.fetch_add(1, Ordering::SeqCst);
        self.set_available(true);
        Ok(())
    }

    async fn api_key(&self) -> Option<String> {
        self.available
            .load(Ordering::SeqCst)
            .then(|| "mock-key".to_string())
    }
}

/// Sleeper that returns immediately and records every requested duration.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Surface event, in the order the player produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Overlay(Option<String>),
    Load { video: String, audio: Option<String> },
    PlayVideo,
    PlayAudio,
    VideoEnded,
}

/// Surface recording every call, with optional start failures.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
    pub fail_video_start: bool,
    pub fail_audio_start: bool,
}

#[async_trait]
impl MediaSurface for RecordingSurface {
    fn set_overlay(&mut self, text: Option<&str>) {
        self.events
            .push(SurfaceEvent::Overlay(text.map(str::to_string)));
    }

    async fn load(
        &mut self,
        video: &MediaHandle,
        audio: Option<&MediaHandle>,
    ) -> StoryreelResult<()> {
        self.events.push(SurfaceEvent::Load {
            video: video.mime_type().clone(),
            audio: audio.map(|a| a.mime_type().clone()),
        });
        Ok(())
    }

    async fn play_video(&mut self) -> StoryreelResult<()> {
        self.events.push(SurfaceEvent::PlayVideo);
        if self.fail_video_start {
            return Err(SurfaceError::new("autoplay blocked").into());
        }
        Ok(())
    }

    async fn play_audio(&mut self) -> StoryreelResult<()> {
        self.events.push(SurfaceEvent::PlayAudio);
        if self.fail_audio_start {
            return Err(SurfaceError::new("audio device busy").into());
        }
        Ok(())
    }

    async fn wait_video_end(&mut self) {
        self.events.push(SurfaceEvent::VideoEnded);
    }
}

/// Scene draft with narration and one line of dialogue.
pub fn spoken_scene(index: u32) -> Scene {
    Scene::builder()
        .index(index)
        .description_native(format!("Cảnh {index}"))
        .description_english(format!("Scene {index} in the bamboo forest"))
        .narration(format!("Narration {index}"))
        .dialogue(vec![DialogueLine::new("Anh Khoai", "Khắc nhập!")])
        .build()
        .unwrap()
}

/// Scene draft with nothing to speak.
pub fn silent_scene(index: u32) -> Scene {
    Scene::builder()
        .index(index)
        .description_english(format!("Silent scene {index}"))
        .build()
        .unwrap()
}
