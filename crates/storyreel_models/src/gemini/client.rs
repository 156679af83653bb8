//! REST client producing every story asset.

use super::dto::{ApiErrorEnvelope, GenerateContentResponse, ImagePredictResponse, Operation};
use super::prompts::{IMAGE_MIME_TYPE, VIDEO_MIME_TYPE};
use super::requests::{image_request, script_request, speech_request, video_request};
use super::speech::Transcript;
use super::{GeminiSettings, parse_script, poll_until_done};
use crate::credentials::reclassify_rejection;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use storyreel_core::{MediaHandle, MediaKind, PcmFormat, Scene, wrap_pcm};
use storyreel_error::{GenerationError, GenerationErrorKind, HttpError, StoryreelResult};
use storyreel_interface::{CredentialSource, Sleeper, StoryProvider, TokioSleeper};
use tracing::{debug, error, info, instrument, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Provider-side failure carrying the provider's own message text.
#[derive(Debug)]
struct ProviderFailure(String);

/// Gemini implementation of [`StoryProvider`].
///
/// The API key is read from the [`CredentialSource`] on every call, so a key
/// selected mid-session takes effect on the next request.
///
/// # Example
///
/// ```no_run
/// use storyreel_interface::StoryProvider;
/// use storyreel_models::{EnvCredentials, GeminiSettings, GeminiStoryClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiStoryClient::new(GeminiSettings::default(), EnvCredentials::default())?;
/// let scenes = client.generate_script().await?;
/// println!("{} scenes", scenes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeminiStoryClient {
    http: Client,
    settings: GeminiSettings,
    credentials: Arc<dyn CredentialSource>,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for GeminiStoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiStoryClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GeminiStoryClient {
    /// Create a client polling on the tokio timer.
    pub fn new(
        settings: GeminiSettings,
        credentials: impl CredentialSource + 'static,
    ) -> StoryreelResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        debug!(base_url = %settings.base_url(), "Creating Gemini story client");
        Ok(Self {
            http,
            settings,
            credentials: Arc::new(credentials),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replace the sleeper used between operation polls.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Endpoint and model selection.
    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    async fn key(&self) -> Result<String, GenerationError> {
        match self.credentials.api_key().await {
            Some(key) => Ok(key),
            None => {
                warn!("No API key selected, refusing to call the provider");
                Err(GenerationError::new(GenerationErrorKind::CredentialMissing))
            }
        }
    }

    async fn post_json<B, R>(&self, url: &str, key: &str, body: &B) -> Result<R, ProviderFailure>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(url, "POST");
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, key)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderFailure(format!("Request failed: {}", e)))?;
        Self::read_json(response).await
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &str, key: &str) -> Result<R, ProviderFailure> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, key)
            .send()
            .await
            .map_err(|e| ProviderFailure(format!("Request failed: {}", e)))?;
        Self::read_json(response).await
    }

    async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ProviderFailure> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API returned error");
            return Err(ProviderFailure(provider_message(status, &body)));
        }
        response
            .json()
            .await
            .map_err(|e| ProviderFailure(format!("Failed to parse response: {}", e)))
    }

    async fn run_video(
        &self,
        key: &str,
        prompt: &str,
        image: &MediaHandle,
    ) -> Result<MediaHandle, GenerationErrorKind> {
        let url = self
            .settings
            .model_url(self.settings.video_model(), "predictLongRunning");
        let submitted: Operation = self
            .post_json(&url, key, &video_request(prompt, image))
            .await
            .map_err(|f| GenerationErrorKind::VideoGenerationFailed(f.0))?;
        info!(operation = %submitted.name, "Video operation submitted");

        let finished = poll_until_done(
            submitted,
            self.settings.poll_interval(),
            self.sleeper.as_ref(),
            |name| {
                let url = self.settings.operation_url(&name);
                async move { self.get_json::<Operation>(&url, key).await }
            },
        )
        .await
        .map_err(|f| GenerationErrorKind::VideoGenerationFailed(f.0))?;

        if let Some(failure) = &finished.error {
            return Err(GenerationErrorKind::VideoGenerationFailed(
                failure.message.clone(),
            ));
        }
        let uri = finished.video_uri().ok_or_else(|| {
            GenerationErrorKind::VideoGenerationFailed(
                "Video generation completed, but no download link was found.".to_string(),
            )
        })?;

        self.download(uri, key).await
    }

    async fn download(&self, uri: &str, key: &str) -> Result<MediaHandle, GenerationErrorKind> {
        debug!(uri, "Downloading generated video");
        let response = self
            .http
            .get(uri)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(|e| GenerationErrorKind::VideoDownloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Video download failed");
            return Err(GenerationErrorKind::VideoDownloadFailed(provider_message(
                status, &body,
            )));
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| value.starts_with("video/"))
            .unwrap_or(VIDEO_MIME_TYPE)
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationErrorKind::VideoDownloadFailed(e.to_string()))?;
        debug!(bytes = bytes.len(), mime_type = %mime_type, "Video downloaded");
        Ok(MediaHandle::new(MediaKind::Video, mime_type, bytes.to_vec()))
    }
}

/// Provider message from an error body, falling back to the raw body.
fn provider_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if body.trim().is_empty() => format!("HTTP {}", status),
        _ => format!("HTTP {}: {}", status, body.trim()),
    }
}

#[async_trait]
impl StoryProvider for GeminiStoryClient {
    #[instrument(skip(self), fields(model = %self.settings.script_model()))]
    async fn generate_script(&self) -> StoryreelResult<Vec<Scene>> {
        let key = self.key().await?;
        let url = self
            .settings
            .model_url(self.settings.script_model(), "generateContent");

        let response: GenerateContentResponse = self
            .post_json(&url, &key, &script_request())
            .await
            .map_err(|f| {
                GenerationError::new(GenerationErrorKind::ScriptGenerationFailed(f.0))
            })?;

        let scenes = parse_script(&response.text())?;
        info!(scenes = scenes.len(), "Story script generated");
        Ok(scenes)
    }

    #[instrument(skip(self, scene), fields(scene = *scene.index(), model = %self.settings.speech_model()))]
    async fn generate_audio(&self, scene: &Scene) -> StoryreelResult<Option<MediaHandle>> {
        let key = self.key().await?;
        let Some(transcript) = Transcript::for_scene(scene) else {
            debug!("Scene has nothing to speak, skipping speech synthesis");
            return Ok(None);
        };
        let url = self
            .settings
            .model_url(self.settings.speech_model(), "generateContent");

        let failed = |message: String| {
            GenerationError::new(GenerationErrorKind::AudioGenerationFailed(message))
        };
        let response: GenerateContentResponse = self
            .post_json(&url, &key, &speech_request(&transcript))
            .await
            .map_err(|f| failed(f.0))?;

        let payload = response
            .inline_data()
            .ok_or_else(|| failed("No audio data received from API.".to_string()))?;
        let pcm = STANDARD
            .decode(payload.data.as_bytes())
            .map_err(|e| failed(format!("Invalid audio payload: {}", e)))?;

        debug!(pcm_bytes = pcm.len(), speakers = transcript.speakers().len(), "Speech synthesized");
        Ok(Some(wrap_pcm(&pcm, PcmFormat::SPEECH)?))
    }

    #[instrument(skip(self, prompt), fields(model = %self.settings.image_model()))]
    async fn generate_image(&self, prompt: &str) -> StoryreelResult<MediaHandle> {
        let key = self.key().await?;
        let url = self
            .settings
            .model_url(self.settings.image_model(), "predict");

        let failed = |message: String| {
            GenerationError::new(GenerationErrorKind::ImageGenerationFailed(message))
        };
        let response: ImagePredictResponse = self
            .post_json(&url, &key, &image_request(prompt))
            .await
            .map_err(|f| failed(f.0))?;

        let prediction = response
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.as_deref().is_some_and(|b| !b.is_empty()))
            .ok_or_else(|| failed("Image generation failed, no image bytes returned.".to_string()))?;
        let encoded = prediction.bytes_base64_encoded.unwrap_or_default();
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| failed(format!("Invalid image payload: {}", e)))?;
        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| IMAGE_MIME_TYPE.to_string());

        debug!(bytes = bytes.len(), mime_type = %mime_type, "Image generated");
        Ok(MediaHandle::new(MediaKind::Image, mime_type, bytes))
    }

    #[instrument(skip(self, prompt, image), fields(model = %self.settings.video_model()))]
    async fn generate_video(
        &self,
        prompt: &str,
        image: &MediaHandle,
    ) -> StoryreelResult<MediaHandle> {
        let key = self.key().await?;
        match self.run_video(&key, prompt, image).await {
            Ok(handle) => {
                info!(bytes = handle.len(), "Video generated");
                Ok(handle)
            }
            Err(kind) => {
                let kind = reclassify_rejection(kind);
                error!(error = %kind, "Video generation failed");
                Err(GenerationError::new(kind).into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
