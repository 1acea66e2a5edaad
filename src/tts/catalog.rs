use std::sync::Arc;

use super::interface::{TtsError, Voice};
use super::synthesizer::VoiceSynthesizer;
use crate::config::{VoiceCatalogSource, DEFAULT_VOICE_ID};

/// The voice list served by `GET /api/voices`
#[derive(Clone)]
pub enum VoiceCatalog {
    /// Only the house voice, whatever the provider offers
    Static,
    Live(Arc<VoiceSynthesizer>),
}

impl VoiceCatalog {
    pub fn from_source(source: VoiceCatalogSource, synthesizer: Arc<VoiceSynthesizer>) -> Self {
        match source {
            VoiceCatalogSource::Static => VoiceCatalog::Static,
            VoiceCatalogSource::Live => VoiceCatalog::Live(synthesizer),
        }
    }

    pub fn house_voice() -> Voice {
        Voice {
            voice_id: DEFAULT_VOICE_ID.to_string(),
            name: "Cousine Djassapro".to_string(),
            category: "custom".to_string(),
        }
    }

    pub async fn voices(&self) -> Result<Vec<Voice>, TtsError> {
        match self {
            VoiceCatalog::Static => Ok(vec![Self::house_voice()]),
            VoiceCatalog::Live(synthesizer) => synthesizer.list_voices().await,
        }
    }
}
