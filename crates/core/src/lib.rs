//! hamcode core - bit strings and parity position utilities
//!
//! This crate provides the bit container shared by every hamcode crate
//! and the pure helpers that locate Hamming control bits within a block.

pub mod bits;
pub mod positions;
pub mod error;

pub use bits::BitString;
pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        bits::BitString,
        positions::{control_bit_positions, power_expansion},
        error::{CoreError, Result},
    };
}
