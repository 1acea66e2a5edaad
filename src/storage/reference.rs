use std::fmt;
use std::path::{Path, PathBuf};

const REMOTE_SCHEME: &str = "gs://";
const LOCAL_SCHEME: &str = "file://";

/// Where a stored audio file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageReference {
    /// Object in a Cloud Storage bucket (`gs://bucket/object`)
    Remote { bucket: String, object: String },
    /// File that only exists on local disk (`file://path`)
    Local(PathBuf),
}

impl StorageReference {
    pub fn is_remote(&self) -> bool {
        matches!(self, StorageReference::Remote { .. })
    }

    pub fn uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StorageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageReference::Remote { bucket, object } => {
                write!(f, "{}{}/{}", REMOTE_SCHEME, bucket, object)
            }
            StorageReference::Local(path) => write!(f, "{}{}", LOCAL_SCHEME, path.display()),
        }
    }
}

/// Why an upload ended up referencing the local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackCause {
    /// No bucket was reachable at startup
    BackendUnavailable,
    /// The upload itself failed
    UploadFailed(String),
}

impl fmt::Display for FallbackCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackCause::BackendUnavailable => write!(f, "storage backend unavailable"),
            FallbackCause::UploadFailed(reason) => write!(f, "upload failed: {}", reason),
        }
    }
}

/// Result of [`super::StorageAdapter::upload`]; uploads never fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Remote(StorageReference),
    LocalFallback { path: PathBuf, cause: FallbackCause },
}

impl UploadOutcome {
    pub fn local(path: &Path, cause: FallbackCause) -> Self {
        UploadOutcome::LocalFallback {
            path: path.to_path_buf(),
            cause,
        }
    }

    pub fn reference(&self) -> StorageReference {
        match self {
            UploadOutcome::Remote(reference) => reference.clone(),
            UploadOutcome::LocalFallback { path, .. } => StorageReference::Local(path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_reference_display() {
        let reference = StorageReference::Remote {
            bucket: "djassapro-audio-temp".to_string(),
            object: "audio-1234.wav".to_string(),
        };
        assert_eq!(reference.uri(), "gs://djassapro-audio-temp/audio-1234.wav");
        assert!(reference.is_remote());
    }

    #[test]
    fn local_reference_display() {
        let reference = StorageReference::Local(PathBuf::from("temp/abc.wav"));
        assert_eq!(reference.uri(), "file://temp/abc.wav");
        assert!(!reference.is_remote());
    }

    #[test]
    fn fallback_outcome_references_local_path() {
        let outcome = UploadOutcome::local(Path::new("temp/x.wav"), FallbackCause::BackendUnavailable);
        assert_eq!(
            outcome.reference(),
            StorageReference::Local(PathBuf::from("temp/x.wav"))
        );
    }
}
