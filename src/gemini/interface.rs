use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;

use crate::google_auth::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("model request failed: {0}")]
    Request(String),
    #[error("model request timed out")]
    Timeout,
    #[error("model returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("No response generated from Gemini")]
    EmptyResponse,
    #[error("could not read audio: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Request(e.to_string())
        }
    }
}

/// Sampling knobs sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

/// One piece of a prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(Blob),
    FileData(FileData),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn inline(mime_type: &str, data: &[u8]) -> Self {
        Part::InlineData(Blob {
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(data),
        })
    }

    pub fn uri(mime_type: &str, file_uri: impl Into<String>) -> Self {
        Part::FileData(FileData {
            mime_type: mime_type.to_string(),
            file_uri: file_uri.into(),
        })
    }
}

/// A hosted generative model that turns prompt parts into text
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(
        &self,
        parts: Vec<Part>,
        params: GenerationParams,
    ) -> Result<String, GenerationError>;
}
