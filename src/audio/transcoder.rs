use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("failed to run ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("ffmpeg exited with code {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
    #[error("ffmpeg produced no output at {}", .0.display())]
    EmptyOutput(PathBuf),
    #[error("ffmpeg timed out after {0:?}")]
    Timeout(Duration),
}

/// Converts an audio file into the fixed speech format (mono, 16-bit PCM, 16 kHz WAV)
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}

/// Transcoder backed by the `ffmpeg` binary
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }

    /// Arguments passed to ffmpeg for one conversion
    pub fn arguments(input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-i".into(), input.into()];
        args.extend(
            ["-acodec", "pcm_s16le", "-ac", "1", "-ar", "16000", "-y"]
                .into_iter()
                .map(OsString::from),
        );
        args.push(output.into());
        args
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let args = Self::arguments(input, output);
        info!(
            "Running FFmpeg command: {} {}",
            self.ffmpeg_path,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(TranscodeError::Spawn)?;

        let result = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(TranscodeError::Spawn)?,
            Err(_) => {
                error!("FFmpeg timed out after {:?}", self.timeout);
                return Err(TranscodeError::Timeout(self.timeout));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
            error!("FFmpeg error: {}", stderr);
            return Err(TranscodeError::Failed {
                code: result.status.code(),
                stderr,
            });
        }

        match tokio::fs::metadata(output).await {
            Ok(meta) if meta.len() > 0 => {
                debug!("Converted {} to {} ({} bytes)", input.display(), output.display(), meta.len());
                Ok(())
            }
            _ => Err(TranscodeError::EmptyOutput(output.to_path_buf())),
        }
    }
}
