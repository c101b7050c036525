//! Text codec implementations

use crate::{CodecError, Result};
use hamcode_core::BitString;
use tracing::debug;

/// Bits per character used when none is configured
pub const DEFAULT_SYMBOL_WIDTH: usize = 16;

/// Generic text codec trait
pub trait TextCodec {
    /// Encode text to bits
    fn encode(&self, text: &str) -> Result<BitString>;

    /// Decode bits to text
    fn decode(&self, bits: &BitString) -> Result<String>;
}

/// Writes every character code as a fixed number of bits, most significant first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthCodec {
    width: usize,
}

impl FixedWidthCodec {
    /// Create a codec with `width` bits per character (1 to 32)
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 || width > u32::BITS as usize {
            return Err(CodecError::InvalidParameters {
                msg: format!("Symbol width must be between 1 and 32 bits, got {}", width),
            });
        }

        Ok(Self { width })
    }

    /// Get the symbol width
    pub fn width(&self) -> usize {
        self.width
    }

    fn fits(&self, code: u32) -> bool {
        self.width >= u32::BITS as usize || code >> self.width == 0
    }
}

impl Default for FixedWidthCodec {
    fn default() -> Self {
        Self {
            width: DEFAULT_SYMBOL_WIDTH,
        }
    }
}

impl TextCodec for FixedWidthCodec {
    fn encode(&self, text: &str) -> Result<BitString> {
        let mut bits = BitString::with_capacity(text.chars().count() * self.width);

        for ch in text.chars() {
            let code = ch as u32;
            if !self.fits(code) {
                return Err(CodecError::EncodingFailed {
                    msg: format!(
                        "Character {:?} (U+{:04X}) does not fit in {} bits",
                        ch, code, self.width
                    ),
                });
            }
            bits.push_value(code, self.width);
        }

        Ok(bits)
    }

    /// Decode symbols back to characters.
    ///
    /// A trailing group shorter than the symbol width is read as a value of
    /// its own. Codes that are not Unicode scalar values become U+FFFD.
    fn decode(&self, bits: &BitString) -> Result<String> {
        if bits.len() % self.width != 0 {
            debug!(
                bits = bits.len(),
                width = self.width,
                "Bit count is not a multiple of the symbol width"
            );
        }

        Ok(bits
            .chunks(self.width)
            .map(|symbol| {
                u32::try_from(BitString::value_of(symbol))
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_encode_single_char() {
        let codec = FixedWidthCodec::new(16).unwrap();
        let bits = codec.encode("A").unwrap();
        assert_eq!(bits.to_string(), "0000000001000001");
        assert_eq!(codec.decode(&bits).unwrap(), "A");
    }

    #[test]
    fn test_cyrillic_text() {
        let codec = FixedWidthCodec::default();
        let text = "Привет, мир!";
        let bits = codec.encode(text).unwrap();
        assert_eq!(bits.len(), text.chars().count() * 16);
        assert_eq!(codec.decode(&bits).unwrap(), text);
    }

    #[test]
    fn test_character_too_wide() {
        let codec = FixedWidthCodec::new(8).unwrap();
        assert!(codec.encode("hello").is_ok());
        assert!(matches!(
            codec.encode("héllo€"),
            Err(CodecError::EncodingFailed { .. })
        ));
    }

    #[test]
    fn test_invalid_width() {
        assert!(FixedWidthCodec::new(0).is_err());
        assert!(FixedWidthCodec::new(33).is_err());
        assert!(FixedWidthCodec::new(32).is_ok());
    }

    #[test]
    fn test_full_width_symbols() {
        let codec = FixedWidthCodec::new(32).unwrap();
        let text = "🦀 crab";
        let bits = codec.encode(text).unwrap();
        assert_eq!(codec.decode(&bits).unwrap(), text);
    }

    #[test]
    fn test_invalid_code_point_is_replaced() {
        let codec = FixedWidthCodec::new(16).unwrap();
        // 0xD800 is a surrogate, not a scalar value
        let bits = BitString::parse("1101100000000000").unwrap();
        assert_eq!(codec.decode(&bits).unwrap(), "\u{FFFD}");
    }

    #[test]
    fn test_trailing_partial_symbol() {
        let codec = FixedWidthCodec::new(8).unwrap();
        // A full "A" followed by seven bits that still read as 65
        let bits = BitString::parse("010000011000001").unwrap();
        assert_eq!(codec.decode(&bits).unwrap(), "AA");
    }

    #[quickcheck]
    fn prop_bmp_text_survives(text: String) -> bool {
        let codec = FixedWidthCodec::default();
        let bmp: String = text.chars().filter(|&c| (c as u32) < 0x1_0000).collect();
        codec
            .encode(&bmp)
            .and_then(|bits| codec.decode(&bits))
            .map(|decoded| decoded == bmp)
            .unwrap_or(false)
    }
}
