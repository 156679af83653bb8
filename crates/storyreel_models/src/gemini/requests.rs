//! Request bodies for the four story operations.

use super::dto::{
    EncodedImage, GenerateContentRequest, GenerationConfig, ImageInstance, ImageParameters,
    MultiSpeakerVoiceConfig, OutputOptions, PredictRequest, SpeechConfig, VideoInstance,
    VideoParameters,
};
use super::prompts::{
    ASPECT_RATIO, IMAGE_MIME_TYPE, STORY_PROMPT, VIDEO_RESOLUTION, image_prompt, script_schema,
    video_prompt,
};
use super::speech::Transcript;
use storyreel_core::MediaHandle;

/// Schema-constrained JSON script request.
pub fn script_request() -> GenerateContentRequest {
    GenerateContentRequest::text(STORY_PROMPT).with_config(GenerationConfig {
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(script_schema()),
        ..Default::default()
    })
}

/// Multi-speaker speech request for a transcript.
pub fn speech_request(transcript: &Transcript) -> GenerateContentRequest {
    GenerateContentRequest::text(transcript.prompt()).with_config(GenerationConfig {
        response_modalities: Some(vec!["AUDIO".to_string()]),
        speech_config: Some(SpeechConfig {
            multi_speaker_voice_config: MultiSpeakerVoiceConfig {
                speaker_voice_configs: transcript.voice_configs(),
            },
        }),
        ..Default::default()
    })
}

/// Single 16:9 JPEG illustration request.
pub fn image_request(prompt: &str) -> PredictRequest<ImageInstance, ImageParameters> {
    PredictRequest {
        instances: vec![ImageInstance {
            prompt: image_prompt(prompt),
        }],
        parameters: ImageParameters {
            sample_count: 1,
            aspect_ratio: ASPECT_RATIO.to_string(),
            output_options: OutputOptions {
                mime_type: IMAGE_MIME_TYPE.to_string(),
            },
        },
    }
}

/// Single 720p clip request seeded from `image`.
pub fn video_request(
    prompt: &str,
    image: &MediaHandle,
) -> PredictRequest<VideoInstance, VideoParameters> {
    PredictRequest {
        instances: vec![VideoInstance {
            prompt: video_prompt(prompt),
            image: EncodedImage {
                bytes_base64_encoded: image.to_base64(),
                mime_type: image.mime_type().clone(),
            },
        }],
        parameters: VideoParameters {
            sample_count: 1,
            aspect_ratio: ASPECT_RATIO.to_string(),
            resolution: VIDEO_RESOLUTION.to_string(),
        },
    }
}
