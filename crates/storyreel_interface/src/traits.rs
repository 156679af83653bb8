//! Trait definitions for providers and host capabilities.

use async_trait::async_trait;
use std::time::Duration;
use storyreel_core::{MediaHandle, Scene};
use storyreel_error::StoryreelResult;

/// A generative service able to produce every asset of a story.
///
/// Implementations fail with `GenerationErrorKind::CredentialMissing` before
/// touching the network when no credential is selected.
#[async_trait]
pub trait StoryProvider: Send + Sync {
    /// Request the story script as ordered scene drafts without media.
    async fn generate_script(&self) -> StoryreelResult<Vec<Scene>>;

    /// Synthesize the scene's narration and dialogue.
    ///
    /// Returns `None` without calling the provider when the scene has nothing to say.
    async fn generate_audio(&self, scene: &Scene) -> StoryreelResult<Option<MediaHandle>>;

    /// Generate one illustration for the prompt.
    async fn generate_image(&self, prompt: &str) -> StoryreelResult<MediaHandle>;

    /// Generate one clip for the prompt, seeded from `image`.
    async fn generate_video(&self, prompt: &str, image: &MediaHandle)
    -> StoryreelResult<MediaHandle>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Host capability that owns API key selection.
///
/// The selection can change at any time outside the application's control,
/// so callers query it at every decision point instead of caching the answer.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Whether a credential is currently selected.
    async fn has_credential(&self) -> bool;

    /// Ask the user to select a credential.
    async fn select_credential(&self) -> StoryreelResult<()>;

    /// The selected API key, if any.
    async fn api_key(&self) -> Option<String>;
}

/// Suspends the caller for a duration.
///
/// Injected wherever the pipeline waits, so tests can run the polling and
/// playback contracts without real delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl<T: StoryProvider + ?Sized> StoryProvider for std::sync::Arc<T> {
    async fn generate_script(&self) -> StoryreelResult<Vec<Scene>> {
        (**self).generate_script().await
    }

    async fn generate_audio(&self, scene: &Scene) -> StoryreelResult<Option<MediaHandle>> {
        (**self).generate_audio(scene).await
    }

    async fn generate_image(&self, prompt: &str) -> StoryreelResult<MediaHandle> {
        (**self).generate_image(prompt).await
    }

    async fn generate_video(
        &self,
        prompt: &str,
        image: &MediaHandle,
    ) -> StoryreelResult<MediaHandle> {
        (**self).generate_video(prompt, image).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: CredentialSource + ?Sized> CredentialSource for std::sync::Arc<T> {
    async fn has_credential(&self) -> bool {
        (**self).has_credential().await
    }

    async fn select_credential(&self) -> StoryreelResult<()> {
        (**self).select_credential().await
    }

    async fn api_key(&self) -> Option<String> {
        (**self).api_key().await
    }
}

#[async_trait]
impl<T: Sleeper + ?Sized> Sleeper for std::sync::Arc<T> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
