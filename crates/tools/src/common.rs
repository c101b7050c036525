//! Common utilities and configuration for tools

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;

use hamcode_core::BitString;

use crate::config::HamcodeConfig;

/// Global configuration options
#[derive(Debug, Clone, Args)]
pub struct GlobalConfig {
    /// Configuration file path (TOML or JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data bits per block, overriding the configuration file
    #[arg(long, global = true)]
    pub word_length: Option<usize>,

    /// Bits per character, overriding the configuration file
    #[arg(long, global = true)]
    pub symbol_width: Option<usize>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            config: None,
            word_length: None,
            symbol_width: None,
            debug: false,
            log_level: "warn".to_string(),
        }
    }
}

impl GlobalConfig {
    /// Load the configuration file, if any, and apply command line overrides
    pub fn resolve(&self) -> Result<HamcodeConfig> {
        let mut config = match &self.config {
            Some(path) => HamcodeConfig::from_file(path)?,
            None => HamcodeConfig::default(),
        };

        if let Some(word_length) = self.word_length {
            config.codec.word_length = word_length;
        }
        if let Some(symbol_width) = self.symbol_width {
            config.codec.symbol_width = symbol_width;
        }

        Ok(config)
    }
}

/// Text taken from the command line, a file, or standard input
#[derive(Debug, Clone, Default, Args)]
pub struct TextInput {
    /// Input text
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Input text file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl TextInput {
    /// Read the text; falls back to standard input
    pub fn read(&self) -> Result<String> {
        if let Some(ref text) = self.text {
            Ok(text.clone())
        } else if let Some(ref file) = self.file {
            std::fs::read_to_string(file).with_context(|| format!("Failed to read file: {:?}", file))
        } else {
            read_stdin()
        }
    }
}

/// Encoded bits taken from the command line, a file, or standard input
#[derive(Debug, Clone, Default, Args)]
pub struct BitsInput {
    /// Encoded bit string
    #[arg(short, long, conflicts_with = "input")]
    pub bits: Option<String>,

    /// File holding the encoded bit string
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl BitsInput {
    /// Read and parse the bits; surrounding whitespace is ignored
    pub fn read(&self) -> Result<BitString> {
        let raw = if let Some(ref bits) = self.bits {
            bits.clone()
        } else if let Some(ref input) = self.input {
            std::fs::read_to_string(input)
                .with_context(|| format!("Failed to read file: {:?}", input))?
        } else {
            read_stdin()?
        };

        BitString::parse(raw.trim()).context("Input is not a string of 0 and 1")
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read standard input")?;
    Ok(buffer)
}

/// Write to a file, or print to standard output when no path is given
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {:?}", path)),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

/// Initialize logging based on configuration
pub fn init_logging(config: &GlobalConfig) -> Result<()> {
    let level = if config.debug {
        Level::DEBUG
    } else {
        config
            .log_level
            .parse::<Level>()
            .map_err(|_| anyhow::anyhow!("Unknown log level: {}", config.log_level))?
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Load configuration from file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }

    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("Failed to parse config file: {}", e),
    }
}

/// Save configuration to file
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}
