//! Hamming single-error-correcting block code
//!
//! Data is cut into blocks of `word_length` bits. Each block receives a
//! control bit at every power-of-two position strictly below its data
//! length, set so that the bits each control position watches have even
//! parity. On receive the syndrome names the flipped bit: its position is
//! the sum of the control positions that disagree.
//!
//! Exactly one error per block can be repaired. With two or more flipped
//! bits in one block the syndrome may name an unrelated position, and that
//! bit is flipped anyway.
//!
//! A short trailing block only carries the control bits below its own data
//! length, so some of its positions are watched by an incomplete set of
//! control bits or by none at all. A single flip at such a position is
//! either missed (the block reads as clean) or repaired at the wrong
//! position, and both outcomes are silent. In a 20-bit block carrying 16
//! data bits, position 16 is unwatched and position 17 is reported as
//! position 1. [`BlockLayout::is_single_error_correcting`] tells the two
//! kinds of block apart.

use hamcode_core::{positions::control_bit_positions, BitString, CoreError};
use tracing::{debug, info, warn};

use crate::fec::{Decoded, ErrorStats, FecDecoder, FecEncoder};
use crate::inject::{self, ErrorSource, Injection};
use crate::layout::BlockLayout;
use crate::syndrome::Syndrome;
use crate::{FrameError, Result};

/// Outcome of error checking on one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// Decoded without error checking
    Unchecked,
    /// Recomputed parity matched every control bit
    Clean,
    /// The bit at this 1-based position was flipped back
    Corrected { position: usize },
    /// The syndrome named a position past the end of the block
    Uncorrectable { position: usize },
}

/// Data bits recovered from one code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    pub data: BitString,
    pub status: BlockStatus,
}

/// Hamming codec for a fixed data word length
#[derive(Debug, Clone)]
pub struct HammingCode {
    word_length: usize,
    control_positions: Vec<usize>,
    full_layout: BlockLayout,
}

impl HammingCode {
    /// Create a codec carrying `word_length` data bits per block
    pub fn new(word_length: usize) -> Result<Self> {
        if word_length == 0 {
            return Err(CoreError::InvalidWordLength {
                length: word_length,
            }
            .into());
        }

        let control_positions = control_bit_positions(word_length);
        let full_layout = BlockLayout::for_data_len(&control_positions, word_length);

        if !full_layout.is_single_error_correcting() {
            warn!(
                word_length,
                code_length = full_layout.code_len(),
                "Full blocks cannot locate every single-bit error"
            );
        }
        debug!(
            word_length,
            parity_bits = full_layout.parity_count(),
            "Created Hamming codec"
        );

        Ok(Self {
            word_length,
            control_positions,
            full_layout,
        })
    }

    /// Data bits per full block
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Configured control positions (powers of two up to the word length)
    pub fn control_positions(&self) -> &[usize] {
        &self.control_positions
    }

    /// Length of a full code block
    pub fn code_length(&self) -> usize {
        self.full_layout.code_len()
    }

    /// Control bits in a full code block
    pub fn parity_bits(&self) -> usize {
        self.full_layout.parity_count()
    }

    /// Whether any single-bit error in a full block can be repaired
    pub fn is_single_error_correcting(&self) -> bool {
        self.full_layout.is_single_error_correcting()
    }

    /// Layout of a block carrying `data_len` data bits
    pub fn layout_for_data(&self, data_len: usize) -> BlockLayout {
        BlockLayout::for_data_len(&self.control_positions, data_len)
    }

    /// Layout of a received block of `code_len` bits
    pub fn layout_for_code(&self, code_len: usize) -> Result<BlockLayout> {
        if code_len > self.code_length() {
            return Err(FrameError::BlockTooLong {
                expected: self.code_length(),
                actual: code_len,
            });
        }

        BlockLayout::for_code_len(&self.control_positions, code_len)
            .ok_or(FrameError::InvalidBlockLength { len: code_len })
    }

    /// Encode one block of at most `word_length` data bits
    pub fn encode_block(&self, data: &[bool]) -> Result<BitString> {
        if data.len() > self.word_length {
            return Err(FrameError::BlockTooLong {
                expected: self.word_length,
                actual: data.len(),
            });
        }

        let layout = self.layout_for_data(data.len());
        Ok(Self::encode_with_layout(data, &layout))
    }

    fn encode_with_layout(data: &[bool], layout: &BlockLayout) -> BitString {
        let mut code = layout.assemble(data);
        let syndrome = Syndrome::compute(&code, layout);

        for &position in layout.parity_positions() {
            code[position - 1] = syndrome.parity(position);
        }

        BitString::from_bits(code)
    }

    /// Decode one code block, repairing a single flipped bit when `fix_error` is set
    pub fn decode_block(&self, code: &[bool], fix_error: bool) -> Result<DecodedBlock> {
        let layout = self.layout_for_code(code.len())?;
        let mut code = code.to_vec();

        let status = if fix_error {
            Self::repair(&mut code, &layout)
        } else {
            BlockStatus::Unchecked
        };

        Ok(DecodedBlock {
            data: BitString::from_bits(layout.strip(&code)),
            status,
        })
    }

    fn repair(code: &mut [bool], layout: &BlockLayout) -> BlockStatus {
        let syndrome = Syndrome::compute(code, layout);

        match syndrome.error_position(code) {
            None => BlockStatus::Clean,
            Some(position) if position <= code.len() => {
                code[position - 1] = !code[position - 1];
                BlockStatus::Corrected { position }
            }
            Some(position) => BlockStatus::Uncorrectable { position },
        }
    }

    /// Flip at most one bit per code block, as chosen by `source`
    pub fn inject_errors<S>(&self, encoded: &BitString, source: &mut S) -> Result<Injection>
    where
        S: ErrorSource + ?Sized,
    {
        inject::inject_errors(encoded, self.code_length(), source)
    }
}

impl FecEncoder for HammingCode {
    fn encode(&self, data: &BitString) -> BitString {
        let mut encoded = BitString::with_capacity(data.len() + self.overhead_bits(data.len()));

        for chunk in data.chunks(self.word_length) {
            let layout = self.layout_for_data(chunk.len());
            if chunk.len() < self.word_length && !layout.is_single_error_correcting() {
                debug!(
                    data_bits = chunk.len(),
                    code_bits = layout.code_len(),
                    "Trailing block cannot locate every single-bit error"
                );
            }
            encoded.extend_from_slice(Self::encode_with_layout(chunk, &layout).bits());
        }

        debug!(
            data_bits = data.len(),
            encoded_bits = encoded.len(),
            "Encoded stream"
        );
        encoded
    }

    fn code_rate(&self) -> f64 {
        self.word_length as f64 / self.code_length() as f64
    }

    fn overhead_bits(&self, input_len: usize) -> usize {
        let full_blocks = input_len / self.word_length;
        let remainder = input_len % self.word_length;
        full_blocks * self.parity_bits() + self.layout_for_data(remainder).parity_count()
    }
}

impl FecDecoder for HammingCode {
    fn decode(&self, encoded: &BitString, fix_error: bool) -> Result<Decoded> {
        let mut data = BitString::with_capacity(encoded.len());
        let mut stats = ErrorStats::default();

        for (block, code) in encoded.chunks(self.code_length()).enumerate() {
            let decoded = self.decode_block(code, fix_error)?;

            match decoded.status {
                BlockStatus::Corrected { position } => {
                    debug!(block, position, "Corrected single-bit error");
                }
                BlockStatus::Uncorrectable { position } => {
                    warn!(block, position, "Syndrome points outside the block");
                }
                BlockStatus::Clean | BlockStatus::Unchecked => {}
            }

            stats.record(&decoded.status);
            data.extend_from_slice(decoded.data.bits());
        }

        if fix_error {
            info!(
                correct = stats.correct_blocks,
                errored = stats.errored_blocks,
                fixed = stats.errors_fixed,
                "Decoded stream"
            );
        }

        Ok(Decoded { data, stats })
    }

    fn can_correct(&self, encoded: &BitString) -> bool {
        encoded.chunks(self.code_length()).all(|code| {
            self.layout_for_code(code.len())
                .map(|layout| {
                    Syndrome::compute(code, &layout)
                        .error_position(code)
                        .map_or(true, |position| position <= code.len())
                })
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn sample_data(len: usize) -> Vec<bool> {
        (0..len).map(|i| (i * 7) % 3 == 0 || i % 5 == 1).collect()
    }

    fn bits(text: &str) -> BitString {
        BitString::parse(text).unwrap()
    }

    #[test]
    fn test_invalid_word_length() {
        let result = HammingCode::new(0);
        assert!(matches!(
            result,
            Err(FrameError::Core(CoreError::InvalidWordLength { length: 0 }))
        ));
    }

    #[test]
    fn test_code_dimensions() {
        let code = HammingCode::new(71).unwrap();
        assert_eq!(code.control_positions(), &[1, 2, 4, 8, 16, 32, 64]);
        assert_eq!(code.code_length(), 78);
        assert_eq!(code.parity_bits(), 7);
        assert!(code.is_single_error_correcting());
        assert!((code.code_rate() - 71.0 / 78.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_of_two_word_length_dimensions() {
        let code = HammingCode::new(8).unwrap();
        assert_eq!(code.control_positions(), &[1, 2, 4, 8]);
        assert_eq!(code.code_length(), 11);
        assert!(!code.is_single_error_correcting());
    }

    #[test]
    fn test_encode_block_known_vector() {
        let code = HammingCode::new(11).unwrap();
        let mut data = vec![false; 11];
        data[0] = true;

        let encoded = code.encode_block(&data).unwrap();
        assert_eq!(encoded.to_string(), "111000000000000");
    }

    #[test]
    fn test_encode_short_block() {
        let code = HammingCode::new(71).unwrap();
        // 'A' as a 16-bit symbol
        let encoded = code.encode_block(bits("0000000001000001").bits()).unwrap();
        assert_eq!(encoded.to_string(), "01000001000001000001");
    }

    #[test]
    fn test_encode_block_too_long() {
        let code = HammingCode::new(4).unwrap();
        assert!(matches!(
            code.encode_block(&[false; 5]),
            Err(FrameError::BlockTooLong { expected: 4, actual: 5 })
        ));
    }

    #[test]
    fn test_clean_block_is_stable() {
        let code = HammingCode::new(71).unwrap();
        let data = sample_data(71);
        let encoded = code.encode_block(&data).unwrap();

        let decoded = code.decode_block(encoded.bits(), true).unwrap();
        assert_eq!(decoded.status, BlockStatus::Clean);
        assert_eq!(decoded.data.bits(), &data[..]);
    }

    #[test]
    fn test_single_bit_correction_every_position() {
        let code = HammingCode::new(71).unwrap();
        let data = sample_data(71);
        let encoded = code.encode_block(&data).unwrap();

        for index in 0..encoded.len() {
            let mut corrupted = encoded.clone();
            corrupted.flip(index).unwrap();

            let decoded = code.decode_block(corrupted.bits(), true).unwrap();
            assert_eq!(decoded.data.bits(), &data[..], "flipped index {}", index);
            assert_eq!(decoded.status, BlockStatus::Corrected { position: index + 1 });
        }
    }

    #[test]
    fn test_detection_without_repair() {
        let code = HammingCode::new(71).unwrap();
        let data = sample_data(71);
        let mut corrupted = code.encode_block(&data).unwrap();
        // Position 3 holds the first data bit
        corrupted.flip(2).unwrap();

        let decoded = code.decode_block(corrupted.bits(), false).unwrap();
        assert_eq!(decoded.status, BlockStatus::Unchecked);
        assert_ne!(decoded.data.bits(), &data[..]);

        let stream = code.decode(&corrupted, false).unwrap();
        assert_eq!(stream.stats, ErrorStats::default());
    }

    #[test]
    fn test_double_error_is_miscorrected() {
        let code = HammingCode::new(11).unwrap();
        let data = sample_data(11);
        let mut corrupted = code.encode_block(&data).unwrap();
        corrupted.flip(2).unwrap();
        corrupted.flip(4).unwrap();

        // 3 = 1 + 2 and 5 = 1 + 4 leave control positions 2 and 4 disagreeing
        let decoded = code.decode_block(corrupted.bits(), true).unwrap();
        assert_eq!(decoded.status, BlockStatus::Corrected { position: 6 });
        assert_ne!(decoded.data.bits(), &data[..]);
    }

    #[test]
    fn test_short_block_single_error_is_misrepaired() {
        let code = HammingCode::new(71).unwrap();
        let data = bits("0000000001000001");
        let encoded = code.encode_block(data.bits()).unwrap();
        assert!(!code.layout_for_code(encoded.len()).unwrap().is_single_error_correcting());

        // Position 16 has no control bit watching it
        let mut unwatched = encoded.clone();
        unwatched.flip(15).unwrap();
        let decoded = code.decode_block(unwatched.bits(), true).unwrap();
        assert_eq!(decoded.status, BlockStatus::Clean);
        assert_ne!(decoded.data, data);

        // Position 17 is only seen by control bit 1
        let mut misnamed = encoded.clone();
        misnamed.flip(16).unwrap();
        let decoded = code.decode_block(misnamed.bits(), true).unwrap();
        assert_eq!(decoded.status, BlockStatus::Corrected { position: 1 });
        assert_eq!(decoded.data.to_string(), "0000000001001001");
    }

    #[test]
    fn test_syndrome_past_block_end() {
        let code = HammingCode::new(71).unwrap();
        let data = sample_data(71);
        let mut corrupted = code.encode_block(&data).unwrap();
        // Control bit 64 plus data position 48 = 32 + 16 name position 112
        corrupted.flip(63).unwrap();
        corrupted.flip(47).unwrap();

        let decoded = code.decode_block(corrupted.bits(), true).unwrap();
        assert_eq!(decoded.status, BlockStatus::Uncorrectable { position: 112 });
        assert!(!code.can_correct(&corrupted));

        let stream = code.decode(&corrupted, true).unwrap();
        assert_eq!(stream.stats.errored_blocks, 1);
        assert_eq!(stream.stats.uncorrectable_blocks, 1);
        assert_eq!(stream.stats.errors_fixed, 0);
    }

    #[test]
    fn test_stream_with_short_final_block() {
        let code = HammingCode::new(71).unwrap();
        let data = BitString::from_bits(sample_data(71 * 2 + 16));
        let encoded = code.encode(&data);
        assert_eq!(encoded.len(), 78 * 2 + 20);
        assert_eq!(code.overhead_bits(data.len()), 7 * 2 + 4);

        let decoded = code.decode(&encoded, true).unwrap();
        assert_eq!(decoded.data, data);
        assert_eq!(decoded.stats.correct_blocks, 3);
        assert_eq!(decoded.stats.errored_blocks, 0);
    }

    #[test]
    fn test_stream_corrects_one_error_per_block() {
        let code = HammingCode::new(71).unwrap();
        let data = BitString::from_bits(sample_data(71 * 4));
        let mut encoded = code.encode(&data);
        for (block, offset) in [(0, 0), (1, 40), (3, 77)] {
            encoded.flip(block * 78 + offset).unwrap();
        }

        assert!(code.can_correct(&encoded));
        let decoded = code.decode(&encoded, true).unwrap();
        assert_eq!(decoded.data, data);
        assert_eq!(decoded.stats.correct_blocks, 1);
        assert_eq!(decoded.stats.errored_blocks, 3);
        assert_eq!(decoded.stats.errors_fixed, 3);
    }

    #[test]
    fn test_stream_rejects_impossible_trailing_block() {
        let code = HammingCode::new(71).unwrap();
        let mut encoded = code.encode(&BitString::from_bits(sample_data(71)));
        encoded.extend_from_slice(&[true, false]);

        assert!(matches!(
            code.decode(&encoded, true),
            Err(FrameError::InvalidBlockLength { len: 2 })
        ));
        assert!(!code.can_correct(&encoded));
    }

    #[test]
    fn test_decode_block_too_long() {
        let code = HammingCode::new(4).unwrap();
        assert!(matches!(
            code.decode_block(&[false; 7], true),
            Err(FrameError::BlockTooLong { expected: 6, actual: 7 })
        ));
    }

    #[test]
    fn test_empty_stream() {
        let code = HammingCode::new(71).unwrap();
        let encoded = code.encode(&BitString::new());
        assert!(encoded.is_empty());

        let decoded = code.decode(&encoded, true).unwrap();
        assert!(decoded.data.is_empty());
        assert_eq!(decoded.stats, ErrorStats::default());
    }

    #[quickcheck]
    fn prop_stream_round_trip(word_length: u8, data: Vec<bool>, fix_error: bool) -> TestResult {
        if word_length == 0 {
            return TestResult::discard();
        }
        let code = HammingCode::new(word_length as usize).unwrap();
        let data = BitString::from_bits(data);

        let encoded = code.encode(&data);
        if encoded.len() != data.len() + code.overhead_bits(data.len()) {
            return TestResult::failed();
        }

        let decoded = code.decode(&encoded, fix_error).unwrap();
        TestResult::from_bool(decoded.data == data && decoded.stats.errored_blocks == 0)
    }

    #[quickcheck]
    fn prop_single_error_repaired(data: Vec<bool>, index: usize) -> TestResult {
        // Word lengths whose full blocks locate every single error
        for word_length in [11, 26, 71] {
            let code = HammingCode::new(word_length).unwrap();
            let block: Vec<bool> = data.iter().copied().cycle().take(word_length).collect();
            if block.len() != word_length {
                return TestResult::discard();
            }

            let mut corrupted = code.encode_block(&block).unwrap();
            let index = index % corrupted.len();
            corrupted.flip(index).unwrap();

            let decoded = code.decode_block(corrupted.bits(), true).unwrap();
            if decoded.data.bits() != &block[..]
                || decoded.status != (BlockStatus::Corrected { position: index + 1 })
            {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
}
