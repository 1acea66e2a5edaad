use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("Voice {voice_id} not found. Available voices: {}", describe(.available))]
    VoiceNotFound { voice_id: String, available: Vec<Voice> },
    #[error("voice provider request failed: {0}")]
    Request(String),
    #[error("voice provider request timed out")]
    Timeout,
    #[error("Error from Eleven Labs API: {body}")]
    Api { status: u16, body: String },
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TtsError::Timeout
        } else {
            TtsError::Request(e.to_string())
        }
    }
}

fn describe(voices: &[Voice]) -> String {
    voices
        .iter()
        .map(|v| format!("{} ({})", v.name, v.voice_id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A voice in the provider's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
}

/// Voice-shaping parameters sent with each synthesis request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.60,
            similarity_boost: 0.75,
            style: 0.9,
            use_speaker_boost: true,
        }
    }
}

/// Hosted text-to-speech provider
#[async_trait]
pub trait VoiceProvider: Send + Sync {
    /// The provider's full voice catalog
    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError>;

    /// Synthesize `text` with `voice_id`, returning encoded audio (MP3)
    async fn text_to_speech(
        &self,
        voice_id: &str,
        text: &str,
        optimize_streaming_latency: u8,
    ) -> Result<Vec<u8>, TtsError>;
}
