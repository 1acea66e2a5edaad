pub mod audio;
pub mod config;
pub mod error;
pub mod gemini;
pub mod google_auth;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod storage;
pub mod tts;
