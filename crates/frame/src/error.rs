//! Error types for hamcode frame

use thiserror::Error;

/// Block coding error types
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid codec parameters: {msg}")]
    InvalidCodecParameters { msg: String },

    #[error("Block size mismatch: expected at most {expected} bits, got {actual}")]
    BlockTooLong { expected: usize, actual: usize },

    #[error("No data block encodes to {len} bits")]
    InvalidBlockLength { len: usize },

    #[error("Invalid error probability: {probability} (must be within 0.0..=1.0)")]
    InvalidProbability { probability: f64 },

    #[error("Core error: {0}")]
    Core(#[from] hamcode_core::CoreError),
}

/// Result type for hamcode frame operations
pub type Result<T> = std::result::Result<T, FrameError>;
