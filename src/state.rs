use std::sync::Arc;
use tracing::{info, warn};

use crate::audio::{FfmpegTranscoder, Transcoder};
use crate::config::Config;
use crate::gemini::{MessageGenerator, TranscriptionClient, VertexClient};
use crate::google_auth::GoogleAuth;
use crate::storage::{GcsBackend, StorageAdapter};
use crate::tts::{ElevenLabsClient, VoiceCatalog, VoiceSynthesizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transcoder: Arc<dyn Transcoder>,
    pub storage: Arc<StorageAdapter>,
    pub transcription: Arc<TranscriptionClient>,
    pub messages: Arc<MessageGenerator>,
    pub voices: Arc<VoiceSynthesizer>,
    pub catalog: Arc<VoiceCatalog>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let timeout = config.request_timeout();

        let auth = Arc::new(GoogleAuth::from_config(config.google_access_token.as_deref()).await?);

        let storage = match GcsBackend::connect(
            &config.storage_base_url,
            &config.storage_bucket,
            auth.clone(),
            timeout,
        )
        .await
        {
            Ok(backend) => StorageAdapter::new(Arc::new(backend)),
            Err(e) => {
                warn!("GCS not available ({}), using local storage", e);
                tokio::fs::create_dir_all(&config.temp_dir).await?;
                StorageAdapter::local_only()
            }
        };

        let model = Arc::new(VertexClient::new(config.vertex_endpoint(), auth, timeout)?);
        info!("Vertex AI model endpoint: {}", config.vertex_endpoint());

        let provider = Arc::new(ElevenLabsClient::new(
            config.elevenlabs_base_url.clone(),
            config.elevenlabs_api_key.clone(),
            timeout,
        )?);
        let voices = Arc::new(VoiceSynthesizer::new(provider));
        let catalog = Arc::new(VoiceCatalog::from_source(config.voice_catalog, voices.clone()));

        let transcoder = Arc::new(FfmpegTranscoder::new(
            config.ffmpeg_path.clone(),
            config.transcode_timeout(),
        ));

        Ok(Self {
            transcoder,
            storage: Arc::new(storage),
            transcription: Arc::new(TranscriptionClient::new(model.clone())),
            messages: Arc::new(MessageGenerator::new(model)),
            voices,
            catalog,
            config: Arc::new(config),
        })
    }
}
