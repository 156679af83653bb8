//! RIFF/WAVE container wrapping for raw PCM speech.
//!
//! Speech synthesis returns bare 16-bit PCM samples, which no player accepts
//! on their own. [`wrap_pcm`] prepends the canonical 44-byte header.

use crate::{MediaHandle, MediaKind};
use storyreel_error::{GenerationError, GenerationErrorKind};

/// Size of the canonical PCM WAV header.
pub const WAV_HEADER_LEN: usize = 44;

/// Largest PCM payload whose RIFF chunk size still fits in 32 bits.
pub const MAX_PCM_LEN: usize = (u32::MAX - 36) as usize;

/// Layout of raw PCM samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PcmFormat {
    /// Samples per second
    pub sample_rate: u32,
    /// Interleaved channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Output format of the speech model: 24 kHz, mono, 16-bit.
    pub const SPEECH: PcmFormat = PcmFormat {
        sample_rate: 24_000,
        channels: 1,
        bits_per_sample: 16,
    };

    /// Bytes consumed per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.channels as u32 * (self.bits_per_sample as u32 / 8)
    }

    /// Bytes per sample frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Playback length of `data_len` bytes of PCM in this format.
    pub fn duration(&self, data_len: usize) -> std::time::Duration {
        let byte_rate = self.byte_rate().max(1) as f64;
        std::time::Duration::from_secs_f64(data_len as f64 / byte_rate)
    }

    /// Canonical header for `data_len` bytes of PCM in this format.
    ///
    /// Fails when `data_len` exceeds [`MAX_PCM_LEN`].
    #[track_caller]
    pub fn wav_header(&self, data_len: usize) -> Result<[u8; WAV_HEADER_LEN], GenerationError> {
        let data_len = u32::try_from(data_len)
            .ok()
            .filter(|len| *len <= u32::MAX - 36)
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::AudioGenerationFailed(format!(
                    "PCM payload of {} bytes does not fit in a WAV container",
                    data_len
                )))
            })?;

        let mut header = [0u8; WAV_HEADER_LEN];
        // RIFF chunk
        header[0..4].copy_from_slice(b"RIFF");
        header[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
        header[8..12].copy_from_slice(b"WAVE");
        // fmt chunk
        header[12..16].copy_from_slice(b"fmt ");
        header[16..20].copy_from_slice(&16u32.to_le_bytes());
        header[20..22].copy_from_slice(&1u16.to_le_bytes());
        header[22..24].copy_from_slice(&self.channels.to_le_bytes());
        header[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        header[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        header[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        header[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        // data chunk
        header[36..40].copy_from_slice(b"data");
        header[40..44].copy_from_slice(&data_len.to_le_bytes());
        Ok(header)
    }
}

/// Wrap raw PCM bytes in a WAV container and expose them as an audio handle.
///
/// The samples are copied unmodified after the header. Payloads longer than
/// [`MAX_PCM_LEN`] are rejected with `AudioGenerationFailed`.
///
/// # Examples
///
/// ```
/// use storyreel_core::{PcmFormat, WAV_HEADER_LEN, wrap_pcm};
///
/// let handle = wrap_pcm(&[0x01, 0x00, 0xFF, 0x7F], PcmFormat::SPEECH)?;
/// assert_eq!(handle.len(), WAV_HEADER_LEN + 4);
/// assert_eq!(handle.mime_type(), "audio/wav");
/// assert_eq!(&handle.bytes()[0..4], b"RIFF");
/// # Ok::<(), storyreel_error::GenerationError>(())
/// ```
#[track_caller]
pub fn wrap_pcm(pcm: &[u8], format: PcmFormat) -> Result<MediaHandle, GenerationError> {
    let header = format.wav_header(pcm.len())?;
    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(pcm);
    Ok(MediaHandle::new(MediaKind::Audio, "audio/wav", bytes))
}
