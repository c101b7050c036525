//! hamcode - Hamming coding of text messages over a simulated noisy channel

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use hamcode_codecs::prelude::*;
use hamcode_frame::prelude::{FecEncoder, RandomErrorSource};
use hamcode_tools::common::{init_logging, write_output};
use hamcode_tools::{BitsInput, GlobalConfig, HamcodeConfig, Simulation, TextInput};

/// hamcode command line tool
#[derive(Parser)]
#[command(name = "hamcode")]
#[command(about = "Hamming single-error-correcting coding of text")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into a bit string
    Encode(EncodeArgs),
    /// Decode a bit string back to text
    Decode(DecodeArgs),
    /// Flip at most one random bit per code block
    Inject(InjectArgs),
    /// Print the CRC-16 of a text
    Checksum(TextInput),
    /// Encode, corrupt, and decode a text, reporting statistics
    Simulate(SimulateArgs),
    /// Show codec parameters
    Info,
}

#[derive(Args)]
struct EncodeArgs {
    #[command(flatten)]
    input: TextInput,

    /// Output file for the encoded bits
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct DecodeArgs {
    #[command(flatten)]
    input: BitsInput,

    /// Repair single-bit errors
    #[arg(long)]
    fix: bool,

    /// Output file for the decoded text
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InjectArgs {
    #[command(flatten)]
    input: BitsInput,

    /// Chance that a code block receives an error
    #[arg(short, long)]
    probability: Option<f64>,

    /// Seed for reproducible errors
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output file for the corrupted bits
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SimulateArgs {
    #[command(flatten)]
    input: TextInput,

    /// Chance that a code block receives an error
    #[arg(short, long)]
    probability: Option<f64>,

    /// Seed for reproducible errors
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn apply_channel_overrides(config: &mut HamcodeConfig, probability: Option<f64>, seed: Option<u64>) {
    if let Some(probability) = probability {
        config.channel.error_probability = probability;
    }
    if seed.is_some() {
        config.channel.seed = seed;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global)?;

    let mut config = cli.global.resolve()?;
    debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::Encode(args) => {
            let codec = config.build_codec()?;
            let text = args.input.read()?;
            let encoded = codec.encode(&text)?;
            info!(
                chars = text.chars().count(),
                bits = encoded.len(),
                "Encoded text"
            );
            write_output(args.output.as_deref(), &encoded.to_string())?;
        }
        Commands::Decode(args) => {
            let codec = config.build_codec()?;
            let bits = args.input.read()?;
            let decoded = codec.decode(&bits, args.fix)?;
            if args.fix {
                eprintln!(
                    "Errored blocks: {}, correct blocks: {}, errors fixed: {}",
                    decoded.stats.errored_blocks,
                    decoded.stats.correct_blocks,
                    decoded.stats.errors_fixed
                );
            }
            write_output(args.output.as_deref(), &decoded.text)?;
        }
        Commands::Inject(args) => {
            apply_channel_overrides(&mut config, args.probability, args.seed);
            let codec = config.build_codec()?;
            let mut source: RandomErrorSource = config.error_source()?;
            let bits = args.input.read()?;
            let injection = codec.inject_errors(&bits, &mut source)?;
            eprintln!("Errors inserted: {}", injection.errors_inserted);
            write_output(args.output.as_deref(), &injection.bits.to_string())?;
        }
        Commands::Checksum(input) => {
            let text = input.read()?;
            println!("{}", crc16_hex(&text));
        }
        Commands::Simulate(args) => {
            apply_channel_overrides(&mut config, args.probability, args.seed);
            let simulation = Simulation::new(&config)?;
            let mut source = config.error_source()?;
            let text = args.input.read()?;
            let report = simulation.run(&text, &mut source)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
        Commands::Info => {
            let codec = config.build_codec()?;
            let code = codec.code();
            println!("Word length: {} bits", code.word_length());
            println!("Symbol width: {} bits", codec.symbols().width());
            println!("Control positions: {:?}", code.control_positions());
            println!("Code block length: {} bits", code.code_length());
            println!("Control bits per block: {}", code.parity_bits());
            println!("Code rate: {:.4}", code.code_rate());
            println!(
                "Corrects every single-bit error in a full block: {}",
                if code.is_single_error_correcting() { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
