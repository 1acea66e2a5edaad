pub mod catalog;
pub mod client;
pub mod interface;
pub mod synthesizer;

pub use catalog::VoiceCatalog;
pub use client::ElevenLabsClient;
pub use interface::{TtsError, Voice, VoiceProvider, VoiceSettings};
pub use synthesizer::VoiceSynthesizer;
