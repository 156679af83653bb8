//! Shared test helpers for provider tests.

#![allow(dead_code)]

pub mod fake_gemini;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyreel_core::{DialogueLine, Scene};
use storyreel_interface::Sleeper;

/// Sleeper that returns immediately and records every requested duration.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Scene draft with the given narration and `(speaker, line)` dialogue.
pub fn scene(narration: &str, dialogue: &[(&str, &str)]) -> Scene {
    Scene::builder()
        .index(1u32)
        .description_native("Anh Khoai vào rừng tìm tre")
        .description_english("Khoai searches the forest for bamboo")
        .narration(narration)
        .dialogue(
            dialogue
                .iter()
                .map(|(speaker, line)| DialogueLine::new(*speaker, *line))
                .collect::<Vec<_>>(),
        )
        .build()
        .unwrap()
}
