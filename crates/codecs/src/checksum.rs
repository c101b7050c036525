//! CRC-16 message checksum
//!
//! Reflected polynomial 0xA001, initial value 0xFFFF, no final xor. The
//! register is fed one whole character code at a time rather than one byte,
//! so ASCII text gets the CRC-16/MODBUS value while other characters XOR
//! their full code point into the register. Used for reporting only; it
//! plays no part in error correction.

/// Reflected generator polynomial
pub const CRC16_POLY: u16 = 0xA001;

/// Register value before any input
pub const CRC16_INIT: u16 = 0xFFFF;

/// Incremental CRC-16 state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    // Wider than 16 bits while a code point above U+FFFF is shifted through;
    // back below 0x10000 once its eight rounds are done
    state: u32,
}

impl Crc16 {
    /// Start a new checksum
    pub fn new() -> Self {
        Self {
            state: CRC16_INIT as u32,
        }
    }

    /// Feed one character into the checksum
    pub fn push_char(&mut self, ch: char) {
        self.state ^= ch as u32;
        for _ in 0..8 {
            if self.state & 1 == 1 {
                self.state = (self.state >> 1) ^ CRC16_POLY as u32;
            } else {
                self.state >>= 1;
            }
        }
    }

    /// Feed every character of `text` into the checksum
    pub fn update(&mut self, text: &str) {
        text.chars().for_each(|ch| self.push_char(ch));
    }

    /// Get the checksum value
    pub fn finalize(self) -> u16 {
        (self.state & 0xFFFF) as u16
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}

/// CRC-16 of the characters of `text`
pub fn crc16(text: &str) -> u16 {
    let mut crc = Crc16::new();
    crc.update(text);
    crc.finalize()
}

/// CRC-16 of `text` as four uppercase hex digits
pub fn crc16_hex(text: &str) -> String {
    format!("{:04X}", crc16(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(crc16(""), 0xFFFF);
        assert_eq!(crc16_hex(""), "FFFF");
    }

    #[test]
    fn test_check_value() {
        assert_eq!(crc16("123456789"), 0x4B37);
        assert_eq!(crc16_hex("123456789"), "4B37");
        assert_eq!(crc16_hex("A"), "707F");
    }

    #[test]
    fn test_cyrillic_uses_code_points() {
        assert_eq!(crc16_hex("Привет"), "478E");
        assert_eq!(crc16_hex("Привет, мир!"), "0D12");
    }

    #[test]
    fn test_astral_code_point() {
        assert_eq!(crc16_hex("😀"), "4149");

        let mut crc = Crc16::new();
        crc.push_char('😀');
        assert!(crc.state <= 0xFFFF);
    }

    #[test]
    fn test_repeated_runs_match() {
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(crc16(text), crc16(text));
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let mut crc = Crc16::new();
        crc.update("При");
        crc.update("вет");
        assert_eq!(crc.finalize(), crc16("Привет"));
    }

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(crc16_hex("Привет, мир!"), "0D12");
        let hex = crc16_hex("A");
        assert_eq!(hex, hex.to_uppercase());
    }
}
