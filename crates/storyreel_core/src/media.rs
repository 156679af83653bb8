//! Generated media handles.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_getters::Getters;

/// Kind of generated media attached to a scene.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MediaKind {
    /// Narration and dialogue speech
    #[display("audio")]
    Audio,
    /// Still illustration
    #[display("image")]
    Image,
    /// Animated clip
    #[display("video")]
    Video,
}

/// An opaque, playable reference to generated content.
///
/// Handles own their bytes. They can be embedded directly as a `data:` URI or
/// handed to a media surface for playback.
///
/// # Examples
///
/// ```
/// use storyreel_core::{MediaHandle, MediaKind};
///
/// let image = MediaHandle::new(MediaKind::Image, "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
/// assert_eq!(image.data_uri(), "data:image/jpeg;base64,/9j/");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Getters)]
pub struct MediaHandle {
    /// What the bytes represent
    kind: MediaKind,
    /// MIME type of the payload
    mime_type: String,
    /// Encoded media bytes
    bytes: Vec<u8>,
}

impl MediaHandle {
    /// Create a handle from encoded bytes.
    pub fn new(kind: MediaKind, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Standard base64 encoding of the payload.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URI usable directly as a media element source.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

// Payloads run to megabytes; keep them out of logs.
impl std::fmt::Debug for MediaHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaHandle")
            .field("kind", &self.kind)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
