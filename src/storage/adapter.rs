use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::interface::{ObjectBackend, StorageError};
use super::reference::{FallbackCause, StorageReference, UploadOutcome};

/// Temporary home for converted audio: a bucket when one is reachable,
/// otherwise the local file it was given.
#[derive(Clone)]
pub struct StorageAdapter {
    backend: Option<Arc<dyn ObjectBackend>>,
}

impl StorageAdapter {
    pub fn new(backend: Arc<dyn ObjectBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Adapter that keeps everything on local disk
    pub fn local_only() -> Self {
        Self { backend: None }
    }

    /// Upload `path`; failures degrade to a local reference instead of an error
    pub async fn upload(&self, path: &Path, content_type: &str) -> UploadOutcome {
        let Some(backend) = &self.backend else {
            return UploadOutcome::local(path, FallbackCause::BackendUnavailable);
        };

        match Self::upload_to(backend.as_ref(), path, content_type).await {
            Ok(reference) => UploadOutcome::Remote(reference),
            Err(e) => {
                error!("Error uploading to GCS: {}", e);
                UploadOutcome::local(path, FallbackCause::UploadFailed(e.to_string()))
            }
        }
    }

    async fn upload_to(
        backend: &dyn ObjectBackend,
        path: &Path,
        content_type: &str,
    ) -> Result<StorageReference, StorageError> {
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let object = format!("audio-{}{}", Uuid::new_v4(), extension);

        let data = tokio::fs::read(path).await?;
        backend.put_object(&object, data, content_type).await?;
        if let Err(e) = backend.make_public(&object).await {
            if let Err(cleanup) = backend.delete_object(&object).await {
                error!("Error deleting {} after failed ACL update: {}", object, cleanup);
            }
            return Err(e);
        }

        Ok(StorageReference::Remote {
            bucket: backend.bucket().to_string(),
            object,
        })
    }

    /// Remove whatever `reference` points at. Never fails; errors are logged.
    pub async fn delete(&self, reference: &StorageReference) {
        match reference {
            StorageReference::Local(path) => match tokio::fs::remove_file(path).await {
                Ok(()) => info!("Deleted local file {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => error!("Error deleting local file {}: {}", path.display(), e),
            },
            StorageReference::Remote { bucket, object } => {
                let Some(backend) = &self.backend else {
                    warn!("Cannot delete {}: no storage backend", reference);
                    return;
                };
                if backend.bucket() != bucket {
                    warn!("Deleting {} through bucket {}", reference, backend.bucket());
                }
                if let Err(e) = backend.delete_object(object).await {
                    error!("Error deleting from GCS: {}", e);
                }
            }
        }
    }
}
