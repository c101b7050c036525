//! Configuration management for hamcode tools

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use hamcode_codecs::prelude::*;
use hamcode_frame::prelude::{RandomErrorSource, DEFAULT_ERROR_PROBABILITY};

use crate::common::{load_config, save_config};

/// Block code and symbol parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Data bits per block, before control bits
    pub word_length: usize,
    /// Bits per encoded character
    pub symbol_width: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            word_length: 71,
            symbol_width: DEFAULT_SYMBOL_WIDTH,
        }
    }
}

/// Simulated channel parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Chance that a code block receives a flipped bit
    pub error_probability: f64,
    /// Seed for reproducible error injection
    pub seed: Option<u64>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            error_probability: DEFAULT_ERROR_PROBABILITY,
            seed: None,
        }
    }
}

/// Complete tool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HamcodeConfig {
    pub codec: CodecConfig,
    pub channel: ChannelConfig,
}

impl HamcodeConfig {
    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        load_config(path).with_context(|| format!("Failed to load config file: {:?}", path))
    }

    /// Save configuration; `.json` files are written as JSON, anything else as TOML
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_config(self, path).with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Build the text codec described by this configuration
    pub fn build_codec(&self) -> Result<HammingTextCodec> {
        HammingTextCodec::new(self.codec.word_length, self.codec.symbol_width)
            .context("Invalid codec configuration")
    }

    /// Build the error source described by this configuration
    pub fn error_source(&self) -> Result<RandomErrorSource> {
        let source = match self.channel.seed {
            Some(seed) => RandomErrorSource::seeded(seed, self.channel.error_probability),
            None => RandomErrorSource::from_entropy(self.channel.error_probability),
        };
        source.context("Invalid channel configuration")
    }
}
