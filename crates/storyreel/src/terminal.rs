//! Terminal front end: a text media surface, a status line printer and an
//! interactive credential source.

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use storyreel_core::{MediaHandle, PcmFormat, PipelineSnapshot, WAV_HEADER_LEN};
use storyreel_error::{ConfigError, StoryreelResult, SurfaceError};
use storyreel_interface::{CredentialSource, Sleeper, TokioSleeper};
use storyreel_models::{EnvCredentials, StaticCredentials};
use storyreel_pipeline::{MediaSurface, PlaybackSettings};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Renders scenes as text: the overlay as subtitles and a line per track.
///
/// A terminal cannot show the clip, so a scene "runs" for as long as its
/// speech track, or the configured clip length for silent scenes.
pub struct TerminalSurface<W> {
    out: W,
    sleeper: Arc<dyn Sleeper>,
    fallback: Duration,
    clip: Duration,
    loaded: Option<(String, usize, Option<usize>)>,
}

impl<W> std::fmt::Debug for TerminalSurface<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("fallback", &self.fallback)
            .field("clip", &self.clip)
            .finish_non_exhaustive()
    }
}

impl TerminalSurface<std::io::Stdout> {
    /// Surface printing to stdout.
    pub fn stdout(settings: &PlaybackSettings) -> Self {
        Self::new(std::io::stdout(), settings)
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Surface printing to `out`, waiting on the tokio timer.
    pub fn new(out: W, settings: &PlaybackSettings) -> Self {
        Self {
            out,
            sleeper: Arc::new(TokioSleeper),
            fallback: settings.clip_duration(),
            clip: settings.clip_duration(),
            loaded: None,
        }
    }

    /// Replace the sleeper used to wait out each clip.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// How long the loaded scene runs.
    pub fn clip_duration(&self) -> Duration {
        self.clip
    }

    /// The writer, for inspecting output.
    pub fn output(&self) -> &W {
        &self.out
    }

    fn write_line(&mut self, line: &str) -> StoryreelResult<()> {
        writeln!(self.out, "{line}")
            .and_then(|_| self.out.flush())
            .map_err(|e| SurfaceError::new(format!("Failed to write to terminal: {}", e)).into())
    }
}

#[async_trait]
impl<W: Write + Send> MediaSurface for TerminalSurface<W> {
    fn set_overlay(&mut self, text: Option<&str>) {
        let Some(text) = text else {
            return;
        };
        for line in text.lines() {
            if let Err(e) = self.write_line(&format!("  │ {line}")) {
                warn!(error = %e, "Failed to print subtitle");
            }
        }
    }

    async fn load(
        &mut self,
        video: &MediaHandle,
        audio: Option<&MediaHandle>,
    ) -> StoryreelResult<()> {
        self.clip = audio
            .map(|a| PcmFormat::SPEECH.duration(a.len().saturating_sub(WAV_HEADER_LEN)))
            .filter(|d| !d.is_zero())
            .unwrap_or(self.fallback);
        self.loaded = Some((video.mime_type().clone(), video.len(), audio.map(MediaHandle::len)));
        debug!(clip_ms = self.clip.as_millis() as u64, "Scene loaded");
        Ok(())
    }

    async fn play_video(&mut self) -> StoryreelResult<()> {
        let (mime_type, bytes, _) = self
            .loaded
            .clone()
            .ok_or_else(|| SurfaceError::new("No clip loaded"))?;
        self.write_line(&format!("  ▶ video {mime_type}, {} KiB (muted)", bytes / 1024))
    }

    async fn play_audio(&mut self) -> StoryreelResult<()> {
        let bytes = self
            .loaded
            .as_ref()
            .and_then(|(_, _, audio)| *audio)
            .ok_or_else(|| SurfaceError::new("No speech track loaded"))?;
        let seconds = self.clip.as_secs_f64();
        self.write_line(&format!("  ♪ speech {seconds:.1}s, {} KiB", bytes / 1024))
    }

    async fn wait_video_end(&mut self) {
        self.sleeper.sleep(self.clip).await;
        self.loaded = None;
    }
}

/// Credential source for interactive use.
///
/// The configured environment variable wins. Otherwise `select_credential`
/// prompts for a key on stdin and keeps it for the rest of the session.
#[derive(Debug, Clone)]
pub struct TerminalCredentials {
    env: EnvCredentials,
    entered: StaticCredentials,
}

impl TerminalCredentials {
    /// Source reading `var` first.
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            env: EnvCredentials::new(var),
            entered: StaticCredentials::empty(),
        }
    }
}

#[async_trait]
impl CredentialSource for TerminalCredentials {
    async fn has_credential(&self) -> bool {
        self.api_key().await.is_some()
    }

    async fn select_credential(&self) -> StoryreelResult<()> {
        if self.env.has_credential().await {
            return Ok(());
        }

        let prompt = format!("Enter your Gemini API key (or set {}): ", self.env.var());
        let mut stdout = tokio::io::stdout();
        let prompted = match stdout.write_all(prompt.as_bytes()).await {
            Ok(()) => stdout.flush().await,
            Err(e) => Err(e),
        };
        prompted.map_err(|e| SurfaceError::new(format!("Failed to prompt for API key: {}", e)))?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| SurfaceError::new(format!("Failed to read API key: {}", e)))?;

        let key = line.trim();
        if key.is_empty() {
            return Err(ConfigError::new("No API key entered").into());
        }
        self.entered.set(key);
        Ok(())
    }

    async fn api_key(&self) -> Option<String> {
        match self.env.api_key().await {
            Some(key) => Some(key),
            None => self.entered.current(),
        }
    }
}

/// Background task printing each new status line of a run.
///
/// Consecutive duplicates are printed once. The task ends when the
/// orchestrator publishing the snapshots is dropped.
#[derive(Debug)]
pub struct StatusPrinter<W> {
    handle: JoinHandle<W>,
}

impl<W: Write + Send + 'static> StatusPrinter<W> {
    /// Start printing snapshots from `snapshots` to `out`.
    pub fn spawn(mut snapshots: watch::Receiver<PipelineSnapshot>, mut out: W) -> Self {
        let handle = tokio::spawn(async move {
            let mut last = String::new();
            while snapshots.changed().await.is_ok() {
                let status = snapshots.borrow_and_update().status_message();
                if status == last {
                    continue;
                }
                if let Err(e) = writeln!(out, "{status}") {
                    warn!(error = %e, "Failed to print status");
                }
                last = status;
            }
            out
        });
        Self { handle }
    }

    /// Stop printing without waiting for the run to end.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the printer to drain and hand back its writer.
    ///
    /// Returns `None`, after logging why, when the task was aborted or panicked.
    pub async fn finish(self) -> Option<W> {
        match self.handle.await {
            Ok(out) => Some(out),
            Err(e) => {
                warn!(error = %e, cancelled = e.is_cancelled(), "Status printer did not finish");
                None
            }
        }
    }
}
