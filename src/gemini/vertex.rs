use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::interface::{GenerationError, GenerationParams, GenerativeModel, Part};
use crate::google_auth::GoogleAuth;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationParams,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini served through Vertex AI's `generateContent` endpoint
pub struct VertexClient {
    client: Client,
    auth: Arc<GoogleAuth>,
    endpoint: String,
}

impl VertexClient {
    pub fn new(endpoint: String, auth: Arc<GoogleAuth>, timeout: Duration) -> Result<Self, GenerationError> {
        info!("Initialized VertexClient: endpoint={}", endpoint);
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            auth,
            endpoint,
        })
    }
}

#[async_trait]
impl GenerativeModel for VertexClient {
    async fn generate_content(
        &self,
        parts: Vec<Part>,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content { role: "user", parts }],
            generation_config: params,
        };
        let token = self.auth.access_token().await?;

        debug!("Sending generateContent request: {:?}", params);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let result: GenerateContentResponse = response.json().await?;
        let text: Option<String> = result
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect());

        text.ok_or(GenerationError::EmptyResponse)
    }
}
