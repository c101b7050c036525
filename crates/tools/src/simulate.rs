//! Simulated transmission over a noisy channel
//!
//! A run checksums the message, encodes it, corrupts the encoded stream,
//! then decodes it twice: once as received and once with repair.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::info;

use hamcode_codecs::prelude::*;
use hamcode_frame::prelude::{ErrorSource, ErrorStats};

use crate::config::HamcodeConfig;

/// Outcome of one simulated transmission
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// CRC-16 of the original text
    pub checksum: String,
    /// CRC-16 of the repaired text
    pub repaired_checksum: String,
    pub word_length: usize,
    pub code_length: usize,
    pub encoded_bits: usize,
    /// Text decoded without repair
    pub received_text: String,
    /// Text decoded with single-error repair
    pub repaired_text: String,
    pub stats: ErrorStats,
}

impl SimulationReport {
    /// Whether repair restored the original message
    pub fn recovered(&self) -> bool {
        self.checksum == self.repaired_checksum
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Checksum: {}", self.checksum)?;
        writeln!(f, "Decoded text with errors: {}", self.received_text)?;
        writeln!(f, "Decoded text with errors fixed: {}", self.repaired_text)?;
        writeln!(f, "Errors inserted: {}", self.stats.errors_inserted)?;
        writeln!(f, "Errored blocks: {}", self.stats.errored_blocks)?;
        writeln!(f, "Correct blocks: {}", self.stats.correct_blocks)?;
        writeln!(f, "Errors fixed: {}", self.stats.errors_fixed)?;
        if self.stats.uncorrectable_blocks > 0 {
            writeln!(f, "Uncorrectable blocks: {}", self.stats.uncorrectable_blocks)?;
        }
        write!(
            f,
            "Repaired checksum: {} ({})",
            self.repaired_checksum,
            if self.recovered() { "match" } else { "mismatch" }
        )
    }
}

/// Transmission simulator
pub struct Simulation {
    codec: HammingTextCodec,
}

impl Simulation {
    /// Create a simulator for the configured codec
    pub fn new(config: &HamcodeConfig) -> Result<Self> {
        Ok(Self {
            codec: config.build_codec()?,
        })
    }

    /// Get the codec used for the run
    pub fn codec(&self) -> &HammingTextCodec {
        &self.codec
    }

    /// Run one transmission of `text`, corrupting it through `source`
    pub fn run<S>(&self, text: &str, source: &mut S) -> Result<SimulationReport>
    where
        S: ErrorSource + ?Sized,
    {
        let start_time = Instant::now();
        let checksum = crc16_hex(text);

        let encoded = self.codec.encode(text)?;
        let injection = self.codec.inject_errors(&encoded, source)?;
        info!(
            encoded_bits = encoded.len(),
            errors_inserted = injection.errors_inserted,
            "Transmitted"
        );

        let received = self.codec.decode(&injection.bits, false)?;
        let repaired = self.codec.decode(&injection.bits, true)?;

        let report = SimulationReport {
            checksum,
            repaired_checksum: crc16_hex(&repaired.text),
            word_length: self.codec.code().word_length(),
            code_length: self.codec.code().code_length(),
            encoded_bits: encoded.len(),
            received_text: received.text,
            repaired_text: repaired.text,
            stats: repaired.stats + injection.stats(),
        };

        info!(
            "Simulation finished in {:?}: {}",
            start_time.elapsed(),
            if report.recovered() { "recovered" } else { "not recovered" }
        );
        Ok(report)
    }
}
