use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use anyhow::Result;

/// Voice used when a request does not name one ("Cousine Djassapro")
pub const DEFAULT_VOICE_ID: &str = "Fo36sCvJyueYOBE0TqjC";

/// Where `GET /api/voices` takes its entries from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceCatalogSource {
    /// The single built-in house voice
    #[default]
    Static,
    /// The voice provider's live catalog
    Live,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Process-wide configuration, read once at startup from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub google_cloud_project: String,
    pub elevenlabs_api_key: String,

    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_vertex_location")]
    pub vertex_location: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    /// Pre-issued OAuth token; when absent application default credentials are used
    #[serde(default)]
    pub google_access_token: Option<String>,

    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,
    #[serde(default)]
    pub vertex_base_url: Option<String>,
    #[serde(default = "default_storage_base_url")]
    pub storage_base_url: String,

    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub transcode_timeout_secs: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub voice_catalog: VoiceCatalogSource,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_storage_bucket() -> String {
    "djassapro-audio-temp".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5174".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_vertex_location() -> String {
    "us-central1".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_storage_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("temp")
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl Config {
    /// Configuration with every optional value at its default
    pub fn new(google_cloud_project: impl Into<String>, elevenlabs_api_key: impl Into<String>) -> Self {
        Self {
            google_cloud_project: google_cloud_project.into(),
            elevenlabs_api_key: elevenlabs_api_key.into(),
            storage_bucket: default_storage_bucket(),
            cors_origins: default_cors_origins(),
            host: default_host(),
            port: default_port(),
            vertex_location: default_vertex_location(),
            gemini_model: default_gemini_model(),
            google_access_token: None,
            elevenlabs_base_url: default_elevenlabs_base_url(),
            vertex_base_url: None,
            storage_base_url: default_storage_base_url(),
            ffmpeg_path: default_ffmpeg_path(),
            temp_dir: default_temp_dir(),
            request_timeout_secs: default_timeout_secs(),
            transcode_timeout_secs: default_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
            voice_catalog: VoiceCatalogSource::default(),
            log_format: LogFormat::default(),
        }
    }

    /// Load from process environment variables (`GOOGLE_CLOUD_PROJECT`, `PORT`, ...)
    pub fn from_env() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(Self::environment())
            .build()?;
        Self::from_source(source)
    }

    /// Unprefixed variables, typed values, comma-separated `CORS_ORIGINS`
    fn environment() -> config::Environment {
        config::Environment::default()
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors_origins")
    }

    pub fn from_source(source: config::Config) -> Result<Self> {
        let config: Config = source.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.google_cloud_project.trim().is_empty() {
            anyhow::bail!("GOOGLE_CLOUD_PROJECT not found in environment variables");
        }
        if self.elevenlabs_api_key.trim().is_empty() {
            anyhow::bail!("ELEVENLABS_API_KEY not found in environment variables");
        }
        Ok(())
    }

    pub fn vertex_endpoint(&self) -> String {
        let base = self.vertex_base_url.clone().unwrap_or_else(|| {
            format!("https://{}-aiplatform.googleapis.com/v1", self.vertex_location)
        });
        format!(
            "{}/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            base.trim_end_matches('/'),
            self.google_cloud_project,
            self.vertex_location,
            self.gemini_model
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn transcode_timeout(&self) -> Duration {
        Duration::from_secs(self.transcode_timeout_secs)
    }
}
