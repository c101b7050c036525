//! Bit string container and operations

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered sequence of bits.
///
/// Renders and parses as a string of `'0'` and `'1'` characters, which is
/// also its serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Create an empty bit string
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create an empty bit string with room for `capacity` bits
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Create a bit string from existing bits
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parse a string of `'0'` and `'1'` characters
    pub fn parse(text: &str) -> Result<Self> {
        text.chars()
            .enumerate()
            .map(|(index, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(CoreError::InvalidBitChar { ch, index }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::from_bits)
    }

    /// Write `value` as `width` bits, most significant first.
    ///
    /// Bits of `value` above `width` are discarded.
    pub fn push_value(&mut self, value: u32, width: usize) {
        for shift in (0..width).rev() {
            let bit = shift < u32::BITS as usize && (value >> shift) & 1 == 1;
            self.bits.push(bit);
        }
    }

    /// Read a slice of bits as an unsigned value, most significant first
    pub fn value_of(bits: &[bool]) -> u64 {
        bits.iter().fold(0u64, |acc, &bit| (acc << 1) | bit as u64)
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the bit string is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a reference to the underlying bits
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Append bits from a slice
    pub fn extend_from_slice(&mut self, bits: &[bool]) {
        self.bits.extend_from_slice(bits);
    }

    /// Invert the bit at a 0-based index
    pub fn flip(&mut self, index: usize) -> Result<()> {
        let len = self.bits.len();
        let bit = self
            .bits
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;
        *bit = !*bit;
        Ok(())
    }

    /// Iterate over consecutive chunks of `size` bits; the last may be shorter.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn chunks(&self, size: usize) -> std::slice::Chunks<'_, bool> {
        self.bits.chunks(size)
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

impl FromStr for BitString {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BitString {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BitString> for String {
    fn from(bits: BitString) -> Self {
        bits.to_string()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
