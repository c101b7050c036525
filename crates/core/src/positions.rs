//! Control bit positions and power-of-two decomposition
//!
//! All positions in this module are 1-based, the way Hamming codes number
//! the bits of a code block.

/// Positions of the control bits for a word of `word_length` data bits.
///
/// Returns the powers of two not exceeding `word_length`, ascending.
pub fn control_bit_positions(word_length: usize) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut current = 1usize;

    while current <= word_length {
        positions.push(current);
        current = match current.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }

    positions
}

/// Decompose a position into the powers of two that sum to it.
///
/// The result is ascending and empty only for 0. A data bit at `position`
/// is covered by exactly the control bits listed here.
pub fn power_expansion(position: usize) -> Vec<usize> {
    let mut powers = Vec::with_capacity(position.count_ones() as usize);
    let mut remaining = position;

    while remaining != 0 {
        let lowest = remaining & remaining.wrapping_neg();
        powers.push(lowest);
        remaining &= remaining - 1;
    }

    powers
}
