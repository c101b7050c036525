//! Synthetic single-bit error injection

use hamcode_core::BitString;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::fec::ErrorStats;
use crate::{FrameError, Result};

/// Chance that a code block receives an error, one in three
pub const DEFAULT_ERROR_PROBABILITY: f64 = 1.0 / 3.0;

/// Decides which bit, if any, to flip in each code block
pub trait ErrorSource {
    /// Pick the 0-based index of the bit to flip in a block of `block_len` bits
    fn pick_error(&mut self, block_len: usize) -> Option<usize>;
}

impl<F> ErrorSource for F
where
    F: FnMut(usize) -> Option<usize>,
{
    fn pick_error(&mut self, block_len: usize) -> Option<usize> {
        self(block_len)
    }
}

/// Error source that corrupts each block with a fixed probability
#[derive(Debug, Clone)]
pub struct RandomErrorSource<R = StdRng> {
    rng: R,
    probability: f64,
}

impl<R: Rng> RandomErrorSource<R> {
    /// Create an error source drawing from `rng`
    pub fn new(rng: R, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(FrameError::InvalidProbability { probability });
        }

        Ok(Self { rng, probability })
    }

    /// Get the per-block error probability
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl RandomErrorSource<StdRng> {
    /// Create a reproducible error source
    pub fn seeded(seed: u64, probability: f64) -> Result<Self> {
        Self::new(StdRng::seed_from_u64(seed), probability)
    }

    /// Create an error source seeded from the operating system
    pub fn from_entropy(probability: f64) -> Result<Self> {
        Self::new(StdRng::from_entropy(), probability)
    }
}

impl<R: Rng> ErrorSource for RandomErrorSource<R> {
    fn pick_error(&mut self, block_len: usize) -> Option<usize> {
        if block_len == 0 || !self.rng.gen_bool(self.probability) {
            return None;
        }
        Some(self.rng.gen_range(0..block_len))
    }
}

/// Corrupted stream and the number of bits flipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub bits: BitString,
    pub errors_inserted: usize,
}

impl Injection {
    /// Statistics carrying the inserted error count
    pub fn stats(&self) -> ErrorStats {
        ErrorStats {
            errors_inserted: self.errors_inserted,
            ..Default::default()
        }
    }
}

/// Flip at most one bit in every `block_len`-bit block of `encoded`
pub fn inject_errors<S>(encoded: &BitString, block_len: usize, source: &mut S) -> Result<Injection>
where
    S: ErrorSource + ?Sized,
{
    if block_len == 0 {
        return Err(FrameError::InvalidCodecParameters {
            msg: "Block length must be greater than 0".to_string(),
        });
    }

    let mut bits = encoded.clone();
    let mut errors_inserted = 0;

    for (block, start) in (0..encoded.len()).step_by(block_len).enumerate() {
        let len = block_len.min(encoded.len() - start);

        if let Some(offset) = source.pick_error(len) {
            if offset >= len {
                return Err(hamcode_core::CoreError::IndexOutOfRange { index: offset, len }.into());
            }
            bits.flip(start + offset)?;
            errors_inserted += 1;
            debug!(block, offset, "Inserted error");
        }
    }

    Ok(Injection {
        bits,
        errors_inserted,
    })
}
