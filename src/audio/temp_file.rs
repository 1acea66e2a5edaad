use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use uuid::Uuid;

/// A request-scoped file under the temp directory.
///
/// The file is removed when the guard is dropped, on every exit path of
/// the handler that owns it. A file that was never written is ignored.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Reserve `<dir>/<prefix><uuid><extension>`; nothing is created yet
    pub fn new(dir: &Path, prefix: &str, extension: &str) -> Self {
        let name = format!("{}{}{}", prefix, Uuid::new_v4(), extension);
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn write(&self, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, data).await
    }
}

// Drop cannot await, so removal is a blocking unlink on the current worker.
// Request temp files are single uploads or one synthesized clip.
impl Drop for TempFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temp file: {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => error!("Error cleaning up temp file {}: {}", self.path.display(), e),
        }
    }
}

/// Extension of an uploaded filename, with its dot, if it looks sane
pub fn upload_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
