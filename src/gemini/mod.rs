pub mod interface;
pub mod message;
pub mod transcription;
pub mod vertex;

pub use interface::{GenerationError, GenerationParams, GenerativeModel, Part};
pub use message::{GeneratedMessage, MessageGenerator, DEFAULT_TONE};
pub use transcription::{Transcription, TranscriptionClient};
pub use vertex::VertexClient;
