use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use super::interface::{TtsError, Voice, VoiceProvider, VoiceSettings};

/// Model used for every synthesis, whatever the caller asked for
pub const SYNTHESIS_MODEL_ID: &str = "eleven_multilingual_v2";

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

/// ElevenLabs REST client
pub struct ElevenLabsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ElevenLabsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self, TtsError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

async fn error_from(response: reqwest::Response) -> TtsError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    error!("Eleven Labs API returned {}: {}", status, body);
    TtsError::Api { status, body }
}

#[async_trait]
impl VoiceProvider for ElevenLabsClient {
    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        let response = self
            .client
            .get(format!("{}/voices", self.base_url))
            .header("xi-api-key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let voices: VoicesResponse = response.json().await?;
        debug!("Fetched {} voices from Eleven Labs", voices.voices.len());
        Ok(voices.voices)
    }

    async fn text_to_speech(
        &self,
        voice_id: &str,
        text: &str,
        optimize_streaming_latency: u8,
    ) -> Result<Vec<u8>, TtsError> {
        let mut request = self
            .client
            .post(format!("{}/text-to-speech/{}", self.base_url, voice_id))
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&SynthesizeRequest {
                text,
                model_id: SYNTHESIS_MODEL_ID,
                voice_settings: VoiceSettings::default(),
            });
        if optimize_streaming_latency > 0 {
            request = request.query(&[("optimize_streaming_latency", optimize_streaming_latency)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let audio = response.bytes().await?;
        debug!("Synthesized {} bytes of audio with voice {}", audio.len(), voice_id);
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ElevenLabsClient {
        ElevenLabsClient::new(server.uri(), "xi-test", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn lists_catalog_voices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/voices"))
            .and(header("xi-api-key", "xi-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "voices": [
                    {"voice_id": "v1", "name": "Awa", "category": "premade", "labels": {}},
                    {"voice_id": "v2", "name": "Koffi"}
                ]
            })))
            .mount(&server)
            .await;

        let voices = client(&server).list_voices().await.unwrap();
        assert_eq!(
            voices,
            vec![
                Voice {
                    voice_id: "v1".to_string(),
                    name: "Awa".to_string(),
                    category: "premade".to_string()
                },
                Voice {
                    voice_id: "v2".to_string(),
                    name: "Koffi".to_string(),
                    category: String::new()
                },
            ]
        );
    }

    #[tokio::test]
    async fn synthesis_sends_fixed_model_and_settings() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/v1"))
            .and(header("xi-api-key", "xi-test"))
            .and(body_json(json!({
                "text": "Bonjour",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": {
                    "stability": 0.6,
                    "similarity_boost": 0.75,
                    "style": 0.9,
                    "use_speaker_boost": true
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let audio = client(&server).text_to_speech("v1", "Bonjour", 0).await.unwrap();
        assert_eq!(audio, b"ID3audio");
    }

    #[tokio::test]
    async fn latency_hint_is_forwarded_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/v1"))
            .and(query_param("optimize_streaming_latency", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).text_to_speech("v1", "Salut", 3).await.unwrap();
    }

    #[tokio::test]
    async fn provider_error_keeps_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"detail":{"status":"invalid_api_key"}}"#),
            )
            .mount(&server)
            .await;

        match client(&server).text_to_speech("v1", "Salut", 0).await {
            Err(TtsError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_api_key"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
