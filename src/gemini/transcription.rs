use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use super::interface::{GenerationError, GenerationParams, GenerativeModel, Part};
use crate::storage::StorageReference;

const TRANSCRIPTION_PROMPT: &str = "
        Transcrivez cet audio en français avec précision.
        Instructions spécifiques:
        - Conservez les expressions locales ivoiriennes
        - Gardez la ponctuation naturelle
        - Respectez le contexte culturel ivoirien
        - Assurez une transcription fidèle au langage parlé
        ";

const AUDIO_MIME_TYPE: &str = "audio/wav";

const TRANSCRIPTION_PARAMS: GenerationParams = GenerationParams {
    max_output_tokens: 2048,
    temperature: 0.1,
    top_p: 0.8,
    top_k: 40,
};

/// Gemini exposes no confidence score, so every transcription reports this
pub const FIXED_CONFIDENCE: f64 = 0.95;
pub const LANGUAGE_CODE: &str = "fr-FR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub confidence: f64,
    pub language_code: String,
}

/// Speech-to-text on top of a generative model
pub struct TranscriptionClient {
    model: Arc<dyn GenerativeModel>,
}

impl TranscriptionClient {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn transcribe(&self, reference: &StorageReference) -> Result<Transcription, GenerationError> {
        let audio = match reference {
            StorageReference::Local(path) => {
                let data = tokio::fs::read(path).await?;
                Part::inline(AUDIO_MIME_TYPE, &data)
            }
            StorageReference::Remote { .. } => Part::uri(AUDIO_MIME_TYPE, reference.uri()),
        };

        let text = self
            .model
            .generate_content(vec![Part::text(TRANSCRIPTION_PROMPT), audio], TRANSCRIPTION_PARAMS)
            .await
            .map_err(|e| {
                error!("Error in Gemini transcription: {}", e);
                e
            })?;

        let transcription = Transcription {
            text: text.trim().to_string(),
            confidence: FIXED_CONFIDENCE,
            language_code: LANGUAGE_CODE.to_string(),
        };
        info!("Transcription result: {:?}", transcription);
        Ok(transcription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct CapturingModel {
        reply: Result<String, ()>,
        calls: Mutex<Vec<(Vec<Part>, GenerationParams)>>,
    }

    impl CapturingModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for CapturingModel {
        async fn generate_content(
            &self,
            parts: Vec<Part>,
            params: GenerationParams,
        ) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push((parts, params));
            self.reply.clone().map_err(|_| GenerationError::Api {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn local_reference_is_sent_inline() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("clip.wav");
        std::fs::write(&wav, b"RIFF").unwrap();

        let model = Arc::new(CapturingModel::replying("  Bonjour tout le monde \n"));
        let client = TranscriptionClient::new(model.clone());

        let result = client.transcribe(&StorageReference::Local(wav)).await.unwrap();
        assert_eq!(
            result,
            Transcription {
                text: "Bonjour tout le monde".to_string(),
                confidence: 0.95,
                language_code: "fr-FR".to_string(),
            }
        );

        let calls = model.calls.lock().unwrap();
        let (parts, params) = &calls[0];
        assert_eq!(parts[0], Part::text(TRANSCRIPTION_PROMPT));
        assert_eq!(parts[1], Part::inline("audio/wav", b"RIFF"));
        assert_eq!(params.max_output_tokens, 2048);
        assert_eq!(params.temperature, 0.1);
        assert_eq!(params.top_p, 0.8);
        assert_eq!(params.top_k, 40);
    }

    #[tokio::test]
    async fn remote_reference_is_sent_by_uri() {
        let model = Arc::new(CapturingModel::replying("Akwaba"));
        let client = TranscriptionClient::new(model.clone());

        client
            .transcribe(&StorageReference::Remote {
                bucket: "audio-bucket".to_string(),
                object: "audio-1.wav".to_string(),
            })
            .await
            .unwrap();

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls[0].0[1], Part::uri("audio/wav", "gs://audio-bucket/audio-1.wav"));
    }

    #[tokio::test]
    async fn missing_local_file_fails_before_calling_model() {
        let model = Arc::new(CapturingModel::replying("unused"));
        let client = TranscriptionClient::new(model.clone());

        let err = client
            .transcribe(&StorageReference::Local(PathBuf::from("/nonexistent/clip.wav")))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Io(_)));
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn model_errors_propagate() {
        let model = Arc::new(CapturingModel {
            reply: Err(()),
            calls: Mutex::new(Vec::new()),
        });
        let client = TranscriptionClient::new(model);

        let err = client
            .transcribe(&StorageReference::Remote {
                bucket: "b".to_string(),
                object: "o.wav".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Api { status: 500, .. }));
    }
}
