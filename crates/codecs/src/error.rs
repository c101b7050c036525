//! Error types for hamcode codecs

use thiserror::Error;

/// Codec error types
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Encoding failed: {msg}")]
    EncodingFailed { msg: String },

    #[error("Invalid codec parameters: {msg}")]
    InvalidParameters { msg: String },

    #[error("Frame error: {0}")]
    Frame(#[from] hamcode_frame::FrameError),

    #[error("Core error: {0}")]
    Core(#[from] hamcode_core::CoreError),
}

/// Result type for hamcode codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
