//! hamcode tools library

pub mod config;
pub mod common;
pub mod simulate;

pub use config::{ChannelConfig, CodecConfig, HamcodeConfig};
pub use common::{BitsInput, GlobalConfig, TextInput};
pub use simulate::{Simulation, SimulationReport};
