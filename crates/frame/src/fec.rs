//! Forward Error Correction (FEC) interfaces and statistics

use std::ops::{Add, AddAssign};

use hamcode_core::BitString;
use serde::{Deserialize, Serialize};

use crate::hamming::BlockStatus;
use crate::Result;

/// Generic FEC encoder trait
pub trait FecEncoder {
    /// Encode a bit stream block by block
    fn encode(&self, data: &BitString) -> BitString;

    /// Get the code rate of a full block (k/n where k is data bits, n is total bits)
    fn code_rate(&self) -> f64;

    /// Get the number of control bits added to `input_len` data bits
    fn overhead_bits(&self, input_len: usize) -> usize;
}

/// Generic FEC decoder trait
pub trait FecDecoder {
    /// Decode a bit stream, repairing single-bit errors when `fix_error` is set
    fn decode(&self, encoded: &BitString, fix_error: bool) -> Result<Decoded>;

    /// Check if every block of the stream is clean or has a locatable error
    fn can_correct(&self, encoded: &BitString) -> bool;
}

/// Output of a stream decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub data: BitString,
    pub stats: ErrorStats,
}

/// Error correction statistics for one run.
///
/// Counters only ever add up, so partial statistics can be merged in any
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorStats {
    /// Blocks checked with no error detected
    pub correct_blocks: usize,
    /// Blocks where an error was detected
    pub errored_blocks: usize,
    /// Bits actually flipped back
    pub errors_fixed: usize,
    /// Errored blocks whose syndrome pointed outside the block
    pub uncorrectable_blocks: usize,
    /// Synthetic errors inserted before decoding
    pub errors_inserted: usize,
}

impl ErrorStats {
    /// Account for one decoded block
    pub fn record(&mut self, status: &BlockStatus) {
        match status {
            BlockStatus::Unchecked => {}
            BlockStatus::Clean => self.correct_blocks += 1,
            BlockStatus::Corrected { .. } => {
                self.errored_blocks += 1;
                self.errors_fixed += 1;
            }
            BlockStatus::Uncorrectable { .. } => {
                self.errored_blocks += 1;
                self.uncorrectable_blocks += 1;
            }
        }
    }

    /// Blocks that went through error checking
    pub fn checked_blocks(&self) -> usize {
        self.correct_blocks + self.errored_blocks
    }

    /// Combine two sets of statistics
    pub fn merge(self, other: Self) -> Self {
        Self {
            correct_blocks: self.correct_blocks + other.correct_blocks,
            errored_blocks: self.errored_blocks + other.errored_blocks,
            errors_fixed: self.errors_fixed + other.errors_fixed,
            uncorrectable_blocks: self.uncorrectable_blocks + other.uncorrectable_blocks,
            errors_inserted: self.errors_inserted + other.errors_inserted,
        }
    }
}

impl Add for ErrorStats {
    type Output = ErrorStats;

    fn add(self, rhs: Self) -> Self::Output {
        self.merge(rhs)
    }
}

impl AddAssign for ErrorStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.merge(rhs);
    }
}
