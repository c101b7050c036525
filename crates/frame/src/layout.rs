//! Placement of control bits within a code block
//!
//! A control position `p` is present in a block only when `p` is strictly
//! less than the number of data bits the block carries. Full blocks and a
//! short trailing block of the same stream can therefore hold different
//! numbers of control bits.

use hamcode_core::positions::power_expansion;

/// Classification of the 1-based positions of one code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    data_len: usize,
    parity_positions: Vec<usize>,
}

impl BlockLayout {
    /// Layout of the block that carries `data_len` data bits
    pub fn for_data_len(control_positions: &[usize], data_len: usize) -> Self {
        let parity_positions = control_positions
            .iter()
            .copied()
            .filter(|&position| position < data_len)
            .collect();

        Self {
            data_len,
            parity_positions,
        }
    }

    /// Layout of a received block of `code_len` bits.
    ///
    /// `data_len + parity_count` grows strictly with `data_len`, so at most
    /// one data length matches. Returns `None` when no data length does.
    pub fn for_code_len(control_positions: &[usize], code_len: usize) -> Option<Self> {
        (0..=control_positions.len())
            .filter_map(|parity_count| code_len.checked_sub(parity_count))
            .map(|data_len| Self::for_data_len(control_positions, data_len))
            .find(|layout| layout.code_len() == code_len)
    }

    /// Number of data bits
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    /// Number of control bits
    pub fn parity_count(&self) -> usize {
        self.parity_positions.len()
    }

    /// Total block length
    pub fn code_len(&self) -> usize {
        self.data_len + self.parity_positions.len()
    }

    /// Control positions present in this block, ascending
    pub fn parity_positions(&self) -> &[usize] {
        &self.parity_positions
    }

    /// Check whether a 1-based position holds a control bit
    pub fn is_parity(&self, position: usize) -> bool {
        self.parity_positions.binary_search(&position).is_ok()
    }

    /// Place data bits at the data positions of a fresh block.
    ///
    /// Control positions are left at 0.
    pub fn assemble(&self, data: &[bool]) -> Vec<bool> {
        debug_assert_eq!(data.len(), self.data_len);

        let mut data_bits = data.iter().copied();
        (1..=self.code_len())
            .map(|position| {
                if self.is_parity(position) {
                    false
                } else {
                    data_bits.next().unwrap_or(false)
                }
            })
            .collect()
    }

    /// Collect the data bits of a block, dropping its control bits
    pub fn strip(&self, code: &[bool]) -> Vec<bool> {
        code.iter()
            .enumerate()
            .filter(|(index, _)| !self.is_parity(index + 1))
            .map(|(_, &bit)| bit)
            .collect()
    }

    /// Whether every single-bit error in this block can be located.
    ///
    /// Holds when every data position decomposes into control positions
    /// present in the block, so that each position has its own syndrome.
    pub fn is_single_error_correcting(&self) -> bool {
        (1..=self.code_len())
            .filter(|&position| !self.is_parity(position))
            .all(|position| {
                power_expansion(position)
                    .iter()
                    .all(|&power| self.is_parity(power))
            })
    }
}
