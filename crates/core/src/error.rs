//! Error types for hamcode core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid word length: {length} (must be greater than 0)")]
    InvalidWordLength { length: usize },

    #[error("Invalid bit character {ch:?} at index {index}")]
    InvalidBitChar { ch: char, index: usize },

    #[error("Bit index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for hamcode core operations
pub type Result<T> = std::result::Result<T, CoreError>;
