mod test_utils;

use std::time::Duration;
use storyreel_core::{MediaHandle, MediaKind};
use storyreel_error::{GenerationErrorKind, StoryreelError};
use storyreel_interface::{CredentialSource, StoryProvider};
use storyreel_models::gemini::{LongRunning, poll_until_done};
use storyreel_models::{
    GeminiSettings, GeminiStoryClient, StaticCredentials, is_credential_rejection,
    reclassify_rejection,
};
use test_utils::{RecordingSleeper, scene};

fn kind_of(err: &StoryreelError) -> &GenerationErrorKind {
    err.generation().expect("generation error").kind()
}

fn offline_client(credentials: StaticCredentials) -> anyhow::Result<GeminiStoryClient> {
    // Nothing listens on the discard port; any request would fail with a transport error.
    let settings = GeminiSettings::builder()
        .base_url("http://127.0.0.1:9")
        .build()?;
    Ok(GeminiStoryClient::new(settings, credentials)?)
}

#[tokio::test]
async fn test_missing_credential_fails_fast() -> anyhow::Result<()> {
    let client = offline_client(StaticCredentials::empty())?;
    let image = MediaHandle::new(MediaKind::Image, "image/jpeg", vec![1]);

    let script = client.generate_script().await.expect_err("no key");
    let audio = client
        .generate_audio(&scene("Ngày xưa...", &[]))
        .await
        .expect_err("no key");
    let picture = client.generate_image("A field").await.expect_err("no key");
    let video = client
        .generate_video("A field", &image)
        .await
        .expect_err("no key");

    for err in [&script, &audio, &picture, &video] {
        assert_eq!(kind_of(err), &GenerationErrorKind::CredentialMissing);
    }
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_is_stage_specific() -> anyhow::Result<()> {
    let client = offline_client(StaticCredentials::new("test-key"))?;

    let err = client.generate_script().await.expect_err("nothing listening");
    assert!(matches!(
        kind_of(&err),
        GenerationErrorKind::ScriptGenerationFailed(_)
    ));

    let err = client.generate_image("A field").await.expect_err("nothing listening");
    assert!(matches!(
        kind_of(&err),
        GenerationErrorKind::ImageGenerationFailed(_)
    ));
    Ok(())
}

#[tokio::test]
async fn test_silent_scene_skips_speech() -> anyhow::Result<()> {
    let client = offline_client(StaticCredentials::new("test-key"))?;

    let audio = client.generate_audio(&scene("", &[])).await?;

    assert!(audio.is_none());
    Ok(())
}

#[tokio::test]
async fn test_selecting_pending_key() -> anyhow::Result<()> {
    let credentials = StaticCredentials::empty().with_pending("fresh-key");
    assert!(!credentials.has_credential().await);

    credentials.select_credential().await?;

    assert_eq!(credentials.api_key().await.as_deref(), Some("fresh-key"));
    Ok(())
}

#[test]
fn test_credential_rejection_predicate() {
    assert!(is_credential_rejection("Requested entity was not found."));
    assert!(is_credential_rejection(
        "HTTP 404 Not Found: Requested entity was not found. [NOT_FOUND]"
    ));
    assert!(!is_credential_rejection("Requested entity was found."));
    assert!(!is_credential_rejection("API key not valid"));
}

#[test]
fn test_reclassify_only_video_rejections() {
    let rejected = "Requested entity was not found.".to_string();

    assert_eq!(
        reclassify_rejection(GenerationErrorKind::VideoDownloadFailed(rejected.clone())),
        GenerationErrorKind::CredentialInvalid(rejected.clone())
    );
    assert_eq!(
        reclassify_rejection(GenerationErrorKind::VideoGenerationFailed("quota".into())),
        GenerationErrorKind::VideoGenerationFailed("quota".into())
    );
    assert_eq!(
        reclassify_rejection(GenerationErrorKind::ImageGenerationFailed(rejected.clone())),
        GenerationErrorKind::ImageGenerationFailed(rejected)
    );
}

#[derive(Debug, Clone)]
struct Job {
    name: String,
    done: bool,
}

impl LongRunning for Job {
    fn is_done(&self) -> bool {
        self.done
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[tokio::test]
async fn test_polls_until_done_at_interval() -> anyhow::Result<()> {
    let sleeper = RecordingSleeper::default();
    let mut remaining = 3;
    let mut polled = Vec::new();

    let job = poll_until_done(
        Job { name: "operations/1".into(), done: false },
        Duration::from_secs(10),
        &sleeper,
        |name| {
            polled.push(name.clone());
            remaining -= 1;
            let done = remaining == 0;
            async move { Ok::<_, String>(Job { name, done }) }
        },
    )
    .await
    .map_err(anyhow::Error::msg)?;

    assert!(job.done);
    assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(10); 3]);
    assert_eq!(polled, vec!["operations/1"; 3]);
    Ok(())
}

#[tokio::test]
async fn test_finished_job_is_not_polled() -> anyhow::Result<()> {
    let sleeper = RecordingSleeper::default();

    let job = poll_until_done(
        Job { name: "operations/2".into(), done: true },
        Duration::from_secs(10),
        &sleeper,
        |_| async { Err::<Job, _>("unexpected poll".to_string()) },
    )
    .await
    .map_err(anyhow::Error::msg)?;

    assert_eq!(job.name, "operations/2");
    assert!(sleeper.sleeps().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_poll_failure_stops_loop() {
    let sleeper = RecordingSleeper::default();

    let result = poll_until_done(
        Job { name: "operations/3".into(), done: false },
        Duration::from_secs(10),
        &sleeper,
        |_| async { Err::<Job, _>("Requested entity was not found.".to_string()) },
    )
    .await;

    assert_eq!(result.unwrap_err(), "Requested entity was not found.");
    assert_eq!(sleeper.sleeps().len(), 1);
}
