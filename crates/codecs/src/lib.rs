//! hamcode codecs - text symbols, checksums, and text-level Hamming coding
//!
//! This crate turns text into fixed-width bit symbols and back, computes
//! the CRC-16 checksum reported alongside a message, and drives the
//! Hamming block code over whole messages.

pub mod text;
pub mod checksum;
pub mod hamming_text;
pub mod error;

pub use error::{CodecError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        text::{TextCodec, FixedWidthCodec, DEFAULT_SYMBOL_WIDTH},
        checksum::{crc16, crc16_hex, Crc16},
        hamming_text::{HammingTextCodec, TextDecode},
        error::{CodecError, Result},
    };
}
