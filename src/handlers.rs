use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::audio::{upload_extension, TempFile};
use crate::config::DEFAULT_VOICE_ID;
use crate::error::ApiError;
use crate::gemini::{GeneratedMessage, Transcription, DEFAULT_TONE};
use crate::state::AppState;
use crate::storage::UploadOutcome;
use crate::tts::TtsError;

/// Optional fields accept both a missing key and an explicit `null`
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
    #[serde(default)]
    pub tone: Option<String>,
    /// Accepted for compatibility; speech is not produced for messages
    #[serde(default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub optimize_streaming_latency: Option<u8>,
    /// Ignored; synthesis always uses the multilingual model
    #[serde(default)]
    pub model_id: Option<String>,
}

pub async fn read_root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Djassapro MVP API is running"
    }))
}

pub async fn list_voices(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let voices = state
        .catalog
        .voices()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(json!({ "voices": voices })))
}

struct AudioUpload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

async fn read_audio_field(multipart: &mut Multipart) -> Result<AudioUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("audio") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid audio upload: {}", e)))?;
        return Ok(AudioUpload {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(ApiError::BadRequest("Field required: audio".to_string()))
}

pub async fn transcribe_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Transcription>, ApiError> {
    let mut multipart = multipart?;
    let upload = read_audio_field(&mut multipart).await?;
    info!("Audio content type: {}", upload.content_type);
    info!("Audio content length: {} bytes", upload.data.len());

    process_audio(&state, upload)
        .await
        .map(Json)
        .map_err(|e| ApiError::Internal(format!("Error processing audio: {}", e)))
}

async fn process_audio(state: &AppState, upload: AudioUpload) -> anyhow::Result<Transcription> {
    let temp_dir = &state.config.temp_dir;

    let input = TempFile::new(temp_dir, "input-", &upload_extension(&upload.filename));
    input.write(&upload.data).await?;

    let wav = TempFile::new(temp_dir, "", ".wav");
    state.transcoder.convert(input.path(), wav.path()).await?;

    let outcome = state.storage.upload(wav.path(), "audio/wav").await;
    match &outcome {
        UploadOutcome::Remote(reference) => info!("Uploaded audio to: {}", reference),
        UploadOutcome::LocalFallback { path, cause } => {
            warn!("Using local audio {} ({})", path.display(), cause)
        }
    }

    let reference = outcome.reference();
    let result = state.transcription.transcribe(&reference).await;
    if reference.is_remote() {
        state.storage.delete(&reference).await;
    }

    Ok(result?)
}

pub async fn text_to_speech(
    State(state): State<AppState>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let voice_id = request.voice_id.as_deref().unwrap_or(DEFAULT_VOICE_ID);
    let latency = request.optimize_streaming_latency.unwrap_or_default();

    let audio = state
        .voices
        .synthesize(&request.text, voice_id, latency)
        .await
        .map_err(|e| match e {
            TtsError::VoiceNotFound { .. } => ApiError::BadRequest(e.to_string()),
            e => ApiError::Internal(format!("Error in text-to-speech: {}", e)),
        })?;

    let file = TempFile::new(&state.config.temp_dir, "tts-", ".mp3");
    file.write(&audio)
        .await
        .map_err(|e| ApiError::Internal(format!("Error in text-to-speech: {}", e)))?;
    let body = tokio::fs::read(file.path())
        .await
        .map_err(|e| ApiError::Internal(format!("Error in text-to-speech: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CONTENT_DISPOSITION, "attachment; filename=speech.mp3"),
        ],
        body,
    ))
}

pub async fn generate_message(
    State(state): State<AppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<GeneratedMessage>, ApiError> {
    let Json(request) = payload?;
    let tone = request.tone.as_deref().unwrap_or(DEFAULT_TONE);

    state
        .messages
        .generate_message(&request.text, tone)
        .await
        .map(Json)
        .map_err(|e| ApiError::Internal(format!("Error generating message: {}", e)))
}
