use std::sync::Arc;
use tracing::{error, info};

use super::interface::{TtsError, Voice, VoiceProvider};

/// Looks a voice up in the provider catalog, then synthesizes with it
pub struct VoiceSynthesizer {
    provider: Arc<dyn VoiceProvider>,
}

impl VoiceSynthesizer {
    pub fn new(provider: Arc<dyn VoiceProvider>) -> Self {
        Self { provider }
    }

    pub async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        self.provider.list_voices().await
    }

    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        optimize_streaming_latency: u8,
    ) -> Result<Vec<u8>, TtsError> {
        let voices = self.provider.list_voices().await?;
        let Some(index) = voices.iter().position(|v| v.voice_id == voice_id) else {
            error!("Error in voice generation: voice {} not found", voice_id);
            return Err(TtsError::VoiceNotFound {
                voice_id: voice_id.to_string(),
                available: voices,
            });
        };

        let voice = &voices[index];
        info!("Generating speech with voice {} ({})", voice.name, voice.voice_id);
        self.provider
            .text_to_speech(voice_id, text, optimize_streaming_latency)
            .await
    }
}
