pub mod temp_file;
pub mod transcoder;

pub use temp_file::{upload_extension, TempFile};
pub use transcoder::{FfmpegTranscoder, TranscodeError, Transcoder};
