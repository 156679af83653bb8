use storyreel_core::{MAX_PCM_LEN, MediaKind, PcmFormat, WAV_HEADER_LEN, wrap_pcm};
use storyreel_error::GenerationErrorKind;

#[test]
fn test_wav_header_matches_canonical_layout() -> anyhow::Result<()> {
    let pcm = [0x01, 0x00, 0xFF, 0x7F, 0x00, 0x80];
    let handle = wrap_pcm(&pcm, PcmFormat::SPEECH)?;

    let mut expected = Vec::new();
    expected.extend_from_slice(b"RIFF");
    expected.extend_from_slice(&[0x2A, 0x00, 0x00, 0x00]); // 36 + 6
    expected.extend_from_slice(b"WAVE");
    expected.extend_from_slice(b"fmt ");
    expected.extend_from_slice(&[0x10, 0x00, 0x00, 0x00]); // fmt chunk size
    expected.extend_from_slice(&[0x01, 0x00]); // PCM
    expected.extend_from_slice(&[0x01, 0x00]); // mono
    expected.extend_from_slice(&[0xC0, 0x5D, 0x00, 0x00]); // 24000 Hz
    expected.extend_from_slice(&[0x80, 0xBB, 0x00, 0x00]); // 48000 bytes/s
    expected.extend_from_slice(&[0x02, 0x00]); // block align
    expected.extend_from_slice(&[0x10, 0x00]); // 16 bits
    expected.extend_from_slice(b"data");
    expected.extend_from_slice(&[0x06, 0x00, 0x00, 0x00]);
    expected.extend_from_slice(&pcm);

    assert_eq!(handle.bytes(), &expected);
    assert_eq!(handle.len(), WAV_HEADER_LEN + pcm.len());
    Ok(())
}

#[test]
fn test_wav_payload_is_copied_unmodified() -> anyhow::Result<()> {
    let pcm: Vec<u8> = (0..=255u8).cycle().take(4800).collect();
    let handle = wrap_pcm(&pcm, PcmFormat::SPEECH)?;

    assert_eq!(handle.len(), 44 + 4800);
    assert_eq!(&handle.bytes()[WAV_HEADER_LEN..], pcm.as_slice());
    assert_eq!(&handle.bytes()[40..44], &4800u32.to_le_bytes());
    assert_eq!(&handle.bytes()[4..8], &(36u32 + 4800).to_le_bytes());
    Ok(())
}

#[test]
fn test_wav_handle_is_audio() -> anyhow::Result<()> {
    let handle = wrap_pcm(&[], PcmFormat::SPEECH)?;

    assert_eq!(*handle.kind(), MediaKind::Audio);
    assert_eq!(handle.mime_type(), "audio/wav");
    assert_eq!(handle.len(), WAV_HEADER_LEN);
    Ok(())
}

#[test]
fn test_speech_format_duration() {
    let format = PcmFormat::SPEECH;

    assert_eq!(format.byte_rate(), 48_000);
    assert_eq!(format.block_align(), 2);
    assert_eq!(format.duration(96_000).as_secs(), 2);
}

#[test]
fn test_wav_header_rejects_oversized_payload() -> anyhow::Result<()> {
    let format = PcmFormat::SPEECH;

    let largest = format.wav_header(MAX_PCM_LEN)?;
    assert_eq!(&largest[4..8], &u32::MAX.to_le_bytes());
    assert_eq!(&largest[40..44], &(u32::MAX - 36).to_le_bytes());

    let err = format
        .wav_header(MAX_PCM_LEN + 1)
        .expect_err("RIFF size would overflow");
    assert!(matches!(
        err.kind(),
        GenerationErrorKind::AudioGenerationFailed(message) if message.contains("WAV container")
    ));
    assert!(format.wav_header(usize::MAX).is_err());
    Ok(())
}
