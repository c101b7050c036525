//! hamcode frame - Hamming block coding and error correction
//!
//! This crate places and computes control bits within data blocks,
//! localizes and repairs single-bit errors through the syndrome, and
//! injects synthetic errors for exercising the decoder.

pub mod layout;
pub mod syndrome;
pub mod hamming;
pub mod fec;
pub mod inject;
pub mod error;

pub use error::{FrameError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        layout::BlockLayout,
        syndrome::Syndrome,
        hamming::{BlockStatus, DecodedBlock, HammingCode},
        fec::{Decoded, ErrorStats, FecDecoder, FecEncoder},
        inject::{ErrorSource, Injection, RandomErrorSource, DEFAULT_ERROR_PROBABILITY},
        error::{FrameError, Result},
    };
}
