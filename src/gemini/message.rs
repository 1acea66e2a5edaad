use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use super::interface::{GenerationError, GenerationParams, GenerativeModel, Part};

pub const DEFAULT_TONE: &str = "friendly";

const MESSAGE_PARAMS: GenerationParams = GenerationParams {
    max_output_tokens: 1024,
    temperature: 0.7,
    top_p: 0.8,
    top_k: 40,
};

/// Advertising copy produced from a short product description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMessage {
    pub message: String,
    /// Speech for the message; not produced yet, always null
    pub audio_url: Option<String>,
}

pub struct MessageGenerator {
    model: Arc<dyn GenerativeModel>,
}

impl MessageGenerator {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn build_prompt(text: &str, tone: &str) -> String {
        format!(
            r#"
        Générez un message publicitaire bref , et engageant en français professionnel à partir du texte suivant:
        "{text}"

        Instructions:
        - Ne générer que le message publicitaire. Sans aucun autre texte de description
        - Utilisez un style approprié
        - Ton: {tone}
        - de 5 à 10 phrases maximum
        - Tutoyer amicalement mais respectueusement
        - Utilisez des émojis appropriés
        - Incluez un appel à l'action
        - le message doit être inspirant et pousser à l'action
        - le message concis et impactant
        - Mettez en valeur les points clés
        "#
        )
    }

    pub async fn generate_message(&self, text: &str, tone: &str) -> Result<GeneratedMessage, GenerationError> {
        let prompt = Self::build_prompt(text, tone);
        let generated = self
            .model
            .generate_content(vec![Part::text(prompt)], MESSAGE_PARAMS)
            .await
            .map_err(|e| {
                error!("Text generation error: {}", e);
                e
            })?;

        let message = generated.trim();
        if message.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(GeneratedMessage {
            message: message.to_string(),
            audio_url: None,
        })
    }
}
