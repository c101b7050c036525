//! Parity check accumulation over a code block

use std::collections::BTreeMap;

use hamcode_core::positions::power_expansion;

use crate::layout::BlockLayout;

/// Per-control-position count of set data bits it watches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Syndrome {
    counts: BTreeMap<usize, usize>,
}

impl Syndrome {
    /// Accumulate the parity counts of a block.
    ///
    /// Control positions never contribute, even to themselves. Powers of
    /// two that are not control positions of this block are not tracked.
    pub fn compute(code: &[bool], layout: &BlockLayout) -> Self {
        let mut counts: BTreeMap<usize, usize> = layout
            .parity_positions()
            .iter()
            .map(|&position| (position, 0))
            .collect();

        for (index, &bit) in code.iter().enumerate() {
            let position = index + 1;
            if !bit || layout.is_parity(position) {
                continue;
            }
            for power in power_expansion(position) {
                if let Some(count) = counts.get_mut(&power) {
                    *count += 1;
                }
            }
        }

        Self { counts }
    }

    /// Accumulated count for a control position
    pub fn count(&self, position: usize) -> Option<usize> {
        self.counts.get(&position).copied()
    }

    /// Expected value of the control bit at `position`
    pub fn parity(&self, position: usize) -> bool {
        self.count(position).map_or(false, |count| count % 2 == 1)
    }

    /// Control positions whose stored bit disagrees with the recomputed parity
    pub fn mismatches(&self, code: &[bool]) -> Vec<usize> {
        self.counts
            .iter()
            .filter(|&(&position, &count)| {
                code.get(position - 1)
                    .map_or(false, |&stored| stored != (count % 2 == 1))
            })
            .map(|(&position, _)| position)
            .collect()
    }

    /// 1-based position of a single flipped bit, if any mismatch exists
    pub fn error_position(&self, code: &[bool]) -> Option<usize> {
        let mismatches = self.mismatches(code);
        if mismatches.is_empty() {
            None
        } else {
            Some(mismatches.iter().sum())
        }
    }

    /// Iterate over (control position, count) pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&position, &count)| (position, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamcode_core::positions::control_bit_positions;

    fn layout(word_length: usize) -> BlockLayout {
        BlockLayout::for_data_len(&control_bit_positions(word_length), word_length)
    }

    #[test]
    fn test_syndrome_counts() {
        let layout = layout(11);
        // Data bit set at position 3 (= 1 + 2) and position 7 (= 1 + 2 + 4)
        let mut code = vec![false; 15];
        code[2] = true;
        code[6] = true;

        let syndrome = Syndrome::compute(&code, &layout);
        assert_eq!(syndrome.count(1), Some(2));
        assert_eq!(syndrome.count(2), Some(2));
        assert_eq!(syndrome.count(4), Some(1));
        assert_eq!(syndrome.count(8), Some(0));
        assert_eq!(syndrome.count(16), None);
        assert!(syndrome.parity(4));
        assert!(!syndrome.parity(1));
    }

    #[test]
    fn test_control_bits_do_not_contribute() {
        let layout = layout(11);
        let mut code = vec![false; 15];
        code[0] = true;
        code[7] = true;

        let syndrome = Syndrome::compute(&code, &layout);
        assert!(syndrome.iter().all(|(_, count)| count == 0));
    }

    #[test]
    fn test_error_position_is_sum_of_mismatches() {
        let layout = layout(11);
        let mut code = vec![false; 15];
        // A lone data bit at position 11 = 1 + 2 + 8 with all control bits clear
        code[10] = true;

        let syndrome = Syndrome::compute(&code, &layout);
        assert_eq!(syndrome.mismatches(&code), vec![1, 2, 8]);
        assert_eq!(syndrome.error_position(&code), Some(11));
    }

    #[test]
    fn test_clean_block_has_no_error_position() {
        let layout = layout(11);
        let code = vec![false; 15];
        let syndrome = Syndrome::compute(&code, &layout);
        assert!(syndrome.mismatches(&code).is_empty());
        assert_eq!(syndrome.error_position(&code), None);
    }
}
