use async_trait::async_trait;

use crate::google_auth::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("storage request failed: {0}")]
    Request(String),
    #[error("storage request timed out")]
    Timeout,
    #[error("storage returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for StorageError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StorageError::Timeout
        } else {
            StorageError::Request(e.to_string())
        }
    }
}

/// A bucket that can hold uploaded audio objects
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    fn bucket(&self) -> &str;

    async fn put_object(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Grant anonymous read access to an object
    async fn make_public(&self, name: &str) -> Result<(), StorageError>;

    /// Delete an object; an object that no longer exists is not an error
    async fn delete_object(&self, name: &str) -> Result<(), StorageError>;
}
