use storyreel_core::{PipelineSnapshot, PipelineState, Progress};
use strum::IntoEnumIterator;

#[test]
fn test_generation_stages_follow_each_other() {
    use PipelineState::*;

    assert!(Idle.can_transition_to(GeneratingScript));
    assert!(GeneratingScript.can_transition_to(GeneratingAudio));
    assert!(GeneratingAudio.can_transition_to(GeneratingImage));
    assert!(GeneratingImage.can_transition_to(GeneratingVideo));
    assert!(GeneratingVideo.can_transition_to(GeneratingAudio));
    assert!(GeneratingVideo.can_transition_to(Playing));
    assert!(Playing.can_transition_to(Idle));
}

#[test]
fn test_illegal_transitions_are_rejected() {
    use PipelineState::*;

    assert!(!Idle.can_transition_to(Playing));
    assert!(!GeneratingScript.can_transition_to(Playing));
    assert!(!GeneratingAudio.can_transition_to(GeneratingVideo));
    assert!(!Playing.can_transition_to(GeneratingScript));
    assert!(!Playing.can_transition_to(Failed));
    assert!(!Failed.can_transition_to(Playing));
}

#[test]
fn test_only_playing_leads_back_to_idle_from_a_run() {
    for state in PipelineState::iter() {
        let allowed = state.can_transition_to(PipelineState::Idle);
        let expected = matches!(state, PipelineState::Playing | PipelineState::AwaitingCredential);
        assert_eq!(allowed, expected, "{state} -> idle");
    }
}

#[test]
fn test_every_generating_stage_can_fail_or_lose_credential() {
    for state in PipelineState::iter().filter(|s| s.is_generating()) {
        assert!(state.can_transition_to(PipelineState::Failed), "{state}");
        assert!(state.can_transition_to(PipelineState::AwaitingCredential), "{state}");
    }
}

#[test]
fn test_status_messages() {
    let progress = Progress::new(2, 9);

    assert_eq!(
        PipelineState::GeneratingImage.status_message(progress, None),
        "Generating image for scene 2/9..."
    );
    assert_eq!(
        PipelineState::Failed.status_message(progress, Some("boom")),
        "Error: boom"
    );

    let snapshot = PipelineSnapshot::default();
    assert_eq!(snapshot.status_message(), "Ready to create your story");
}

#[test]
fn test_state_names_are_kebab_case() -> anyhow::Result<()> {
    assert_eq!(PipelineState::AwaitingCredential.to_string(), "awaiting-credential");
    assert_eq!(
        serde_json::to_string(&PipelineState::GeneratingVideo)?,
        "\"generating-video\""
    );
    Ok(())
}
