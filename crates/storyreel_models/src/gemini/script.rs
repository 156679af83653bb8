//! Script response parsing.

use serde::Deserialize;
use storyreel_core::{DialogueLine, Scene};
use storyreel_error::{GenerationError, GenerationErrorKind};
use tracing::{debug, warn};

/// One scene as the script model writes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptEntry {
    scene: f64,
    #[serde(default)]
    scene_description: String,
    scene_description_en: String,
    #[serde(default)]
    narration: String,
    #[serde(default)]
    dialogue: Vec<DialogueEntry>,
}

#[derive(Debug, Deserialize)]
struct DialogueEntry {
    character: String,
    line: String,
}

/// Parse script model output into scene drafts, keeping the provider's order.
///
/// Code fences around the JSON are tolerated. An unparseable body, an empty
/// array, or a scene ordinal that is not a positive integer is a
/// `MalformedScript` error.
///
/// # Examples
///
/// ```
/// use storyreel_models::gemini::parse_script;
///
/// let scenes = parse_script(
///     r#"[{"scene": 1, "sceneDescription": "Cánh đồng", "sceneDescriptionEn": "A rice field"}]"#,
/// )
/// .unwrap();
/// assert_eq!(scenes.len(), 1);
/// assert!(scenes[0].narration().is_empty());
/// ```
#[track_caller]
pub fn parse_script(text: &str) -> Result<Vec<Scene>, GenerationError> {
    let body = strip_code_fence(text);
    let entries: Vec<ScriptEntry> = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Script response is not valid JSON for the schema");
        malformed(format!("invalid script JSON: {e}"))
    })?;

    if entries.is_empty() {
        return Err(malformed("script contains no scenes"));
    }

    let scenes = entries
        .into_iter()
        .map(into_scene)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(scenes = scenes.len(), "Parsed story script");
    Ok(scenes)
}

#[track_caller]
fn into_scene(entry: ScriptEntry) -> Result<Scene, GenerationError> {
    if !(entry.scene >= 1.0 && entry.scene.fract() == 0.0 && entry.scene <= u32::MAX as f64) {
        return Err(malformed(format!(
            "scene ordinal must be a positive integer, got {}",
            entry.scene
        )));
    }

    let dialogue = entry
        .dialogue
        .into_iter()
        .map(|d| DialogueLine::new(d.character, d.line))
        .collect::<Vec<_>>();

    Scene::builder()
        .index(entry.scene as u32)
        .description_native(entry.scene_description)
        .description_english(entry.scene_description_en)
        .narration(entry.narration)
        .dialogue(dialogue)
        .build()
        .map_err(|e| malformed(e.to_string()))
}

/// Remove a surrounding ```` ```json ```` fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[track_caller]
fn malformed(message: impl Into<String>) -> GenerationError {
    GenerationError::new(GenerationErrorKind::MalformedScript(message.into()))
}
