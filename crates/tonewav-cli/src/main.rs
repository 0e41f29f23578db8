//! tonewav CLI - sine tone WAV generator
//!
//! Renders a single sine tone to a mono PCM WAV file and inspects the
//! headers of existing files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

// Use modules from the library crate
use tonewav_cli::commands;
use tonewav_cli::commands::generate::ConfigOverrides;

/// tonewav - Sine Tone WAV Generator
#[derive(Parser)]
#[command(name = "tonewav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a sine tone to a WAV file
    Generate {
        /// JSON config file; flags below override its values
        #[arg(short, long)]
        config: Option<String>,

        /// Tone frequency in Hz (default: 440)
        #[arg(short, long)]
        frequency: Option<f64>,

        /// Oscillator amplitude in [0, 1] (default: 0.5)
        #[arg(short, long)]
        amplitude: Option<f64>,

        /// Duration in seconds (default: 2)
        #[arg(short, long)]
        duration_seconds: Option<f64>,

        /// Sample rate in Hz (default: 44100)
        #[arg(short, long)]
        sample_rate: Option<u32>,

        /// Bits per sample: 8, 16, 24 or 32 (default: 16)
        #[arg(short, long)]
        bit_depth: Option<u16>,

        /// Output gain in (0, 1] applied when quantizing (default: 0.01)
        #[arg(long)]
        attenuation: Option<f64>,

        /// Output file, or `-` for stdout (default: waveform.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,

        /// Print a summary after a successful render
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a WAV file header and check its size fields
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            frequency,
            amplitude,
            duration_seconds,
            sample_rate,
            bit_depth,
            attenuation,
            output,
            json,
            verbose,
        } => {
            let overrides = ConfigOverrides {
                frequency,
                amplitude,
                duration_seconds,
                sample_rate,
                bit_depth,
                attenuation,
                output_path: output,
            };
            commands::generate::run(config.as_deref(), &overrides, json, verbose)
        }
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
