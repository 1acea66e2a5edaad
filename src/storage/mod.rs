pub mod adapter;
pub mod gcs;
pub mod interface;
pub mod reference;

pub use adapter::StorageAdapter;
pub use gcs::GcsBackend;
pub use interface::{ObjectBackend, StorageError};
pub use reference::{FallbackCause, StorageReference, UploadOutcome};
