//! Hamming coding of whole text messages
//!
//! Text is written as fixed-width symbols, the resulting bit stream is cut
//! into blocks for the Hamming code, and the path is reversed on receive.

use hamcode_core::BitString;
use hamcode_frame::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::text::{FixedWidthCodec, TextCodec};
use crate::Result;

/// Text recovered from a transmitted stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextDecode {
    pub text: String,
    pub stats: ErrorStats,
}

/// Text codec protected by a Hamming block code
#[derive(Debug, Clone)]
pub struct HammingTextCodec {
    code: HammingCode,
    symbols: FixedWidthCodec,
}

impl HammingTextCodec {
    /// Create a codec with `word_length` data bits per block and
    /// `symbol_width` bits per character
    pub fn new(word_length: usize, symbol_width: usize) -> Result<Self> {
        Ok(Self {
            code: HammingCode::new(word_length)?,
            symbols: FixedWidthCodec::new(symbol_width)?,
        })
    }

    /// Get the underlying block code
    pub fn code(&self) -> &HammingCode {
        &self.code
    }

    /// Get the symbol codec
    pub fn symbols(&self) -> &FixedWidthCodec {
        &self.symbols
    }

    /// Encode text into the transmitted bit stream
    pub fn encode(&self, text: &str) -> Result<BitString> {
        let payload = self.symbols.encode(text)?;
        let encoded = self.code.encode(&payload);

        debug!(
            chars = text.chars().count(),
            payload_bits = payload.len(),
            encoded_bits = encoded.len(),
            "Encoded text"
        );
        Ok(encoded)
    }

    /// Decode a transmitted stream back to text
    pub fn decode(&self, transmitted: &BitString, fix_error: bool) -> Result<TextDecode> {
        let Decoded { data, stats } = self.code.decode(transmitted, fix_error)?;

        if data.len() % self.symbols.width() != 0 {
            warn!(
                data_bits = data.len(),
                symbol_width = self.symbols.width(),
                "Decoded data does not split into whole symbols"
            );
        }

        let text = self.symbols.decode(&data)?;
        Ok(TextDecode { text, stats })
    }

    /// Corrupt at most one bit per code block of an encoded stream
    pub fn inject_errors<S>(&self, encoded: &BitString, source: &mut S) -> Result<Injection>
    where
        S: ErrorSource + ?Sized,
    {
        Ok(self.code.inject_errors(encoded, source)?)
    }
}
