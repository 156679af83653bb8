//! Credential sources and provider rejection detection.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storyreel_error::{ConfigError, GenerationErrorKind, StoryreelResult};
use storyreel_interface::CredentialSource;
use tracing::{debug, warn};

/// Provider text that marks a rejected or unknown API key.
const CREDENTIAL_REJECTION: &str = "Requested entity was not found.";

/// Whether a provider error message means the selected key was rejected.
///
/// This matches provider wording and breaks if the provider rephrases it.
/// Keep every such check behind this one predicate.
///
/// # Examples
///
/// ```
/// use storyreel_models::is_credential_rejection;
///
/// assert!(is_credential_rejection(
///     r#"HTTP 404: {"error": {"code": 404, "message": "Requested entity was not found."}}"#
/// ));
/// assert!(!is_credential_rejection("HTTP 500: internal error"));
/// ```
pub fn is_credential_rejection(message: &str) -> bool {
    message.contains(CREDENTIAL_REJECTION)
}

/// Report a video failure whose provider text is a key rejection as
/// `CredentialInvalid`. Every other kind passes through unchanged.
///
/// # Examples
///
/// ```
/// use storyreel_error::GenerationErrorKind;
/// use storyreel_models::reclassify_rejection;
///
/// let kind = reclassify_rejection(GenerationErrorKind::VideoGenerationFailed(
///     "Requested entity was not found.".to_string(),
/// ));
/// assert!(kind.is_credential_error());
/// ```
pub fn reclassify_rejection(kind: GenerationErrorKind) -> GenerationErrorKind {
    match kind {
        GenerationErrorKind::VideoGenerationFailed(message)
        | GenerationErrorKind::VideoDownloadFailed(message)
            if is_credential_rejection(&message) =>
        {
            GenerationErrorKind::CredentialInvalid(message)
        }
        other => other,
    }
}

/// Reads the API key from an environment variable on every query.
///
/// Selection is out of this process's hands, so `select_credential` only
/// reports whether the variable is now set.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    /// Source backed by the named environment variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the environment variable.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new("GEMINI_API_KEY")
    }
}

#[async_trait]
impl CredentialSource for EnvCredentials {
    async fn has_credential(&self) -> bool {
        self.api_key().await.is_some()
    }

    async fn select_credential(&self) -> StoryreelResult<()> {
        if self.has_credential().await {
            debug!(var = %self.var, "Credential present in environment");
            Ok(())
        } else {
            warn!(var = %self.var, "No credential in environment");
            Err(ConfigError::new(format!("{} environment variable not set", self.var)).into())
        }
    }

    async fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|key| !key.trim().is_empty())
    }
}

/// In-memory credential, replaceable at runtime.
///
/// # Examples
///
/// ```
/// use storyreel_models::StaticCredentials;
///
/// let credentials = StaticCredentials::new("test-key");
/// credentials.clear();
/// assert!(credentials.current().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    key: Arc<Mutex<Option<String>>>,
    pending: Arc<Mutex<Option<String>>>,
}

impl StaticCredentials {
    /// Source holding `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Arc::new(Mutex::new(Some(key.into()))),
            pending: Arc::default(),
        }
    }

    /// Source with no key selected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Key that the next `select_credential` call will install.
    pub fn with_pending(self, key: impl Into<String>) -> Self {
        *lock(&self.pending) = Some(key.into());
        self
    }

    /// Replace the selected key.
    pub fn set(&self, key: impl Into<String>) {
        *lock(&self.key) = Some(key.into());
    }

    /// Remove the selected key.
    pub fn clear(&self) {
        *lock(&self.key) = None;
    }

    /// Currently selected key.
    pub fn current(&self) -> Option<String> {
        lock(&self.key).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn has_credential(&self) -> bool {
        self.current().is_some()
    }

    async fn select_credential(&self) -> StoryreelResult<()> {
        if let Some(key) = lock(&self.pending).take() {
            self.set(key);
        }
        Ok(())
    }

    async fn api_key(&self) -> Option<String> {
        self.current()
    }
}
