//! Inspect command implementation
//!
//! Parses the header of a WAV file and checks its size fields against the
//! real file length.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;
use tonewav_audio::wav::compute_pcm_hash;
use tonewav_audio::WavHeader;

use super::json_output::{error_codes, InspectOutput, JsonError};

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 valid, 1 invalid or unreadable
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input)
    } else {
        run_human(input)
    }
}

/// Run inspect with human-readable (colored) output
fn run_human(input: &str) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), input);

    let bytes = fs::read(input).with_context(|| format!("Failed to read file: {}", input))?;
    let file_len = bytes.len() as u64;

    let header = match WavHeader::parse(&bytes) {
        Ok(header) => header,
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
    };

    println!("  {} {}", "RIFF size:".dimmed(), header.riff_size);
    println!("  {} {}", "Audio format:".dimmed(), header.audio_format);
    println!("  {} {}", "Channels:".dimmed(), header.channels);
    println!("  {} {} Hz", "Sample rate:".dimmed(), header.sample_rate);
    println!("  {} {} bytes/s", "Byte rate:".dimmed(), header.byte_rate);
    println!("  {} {}", "Block align:".dimmed(), header.block_align);
    println!("  {} {}", "Bits per sample:".dimmed(), header.bits_per_sample);
    println!("  {} {}", "Data size:".dimmed(), header.data_size);
    println!(
        "  {} {} ({:.3} s)",
        "Samples:".dimmed(),
        header.num_samples(),
        header.duration_seconds()
    );
    if let Some(hash) = compute_pcm_hash(&bytes) {
        println!("  {} {}", "PCM hash:".dimmed(), hash);
    }

    match header.check_sizes(file_len) {
        Ok(()) => {
            println!("\n{} Header sizes match {} byte file", "SUCCESS".green().bold(), file_len);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            Ok(ExitCode::from(1))
        }
    }
}

/// Run inspect with machine-readable JSON output
fn run_json(input: &str) -> Result<ExitCode> {
    let mut output = InspectOutput {
        success: false,
        errors: Vec::new(),
        input: input.to_string(),
        file_bytes: None,
        header: None,
        pcm_hash: None,
    };

    let bytes = match fs::read(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            output.errors.push(JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read file {}: {}", input, e),
            ));
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
    };
    output.file_bytes = Some(bytes.len() as u64);
    output.pcm_hash = compute_pcm_hash(&bytes);

    match WavHeader::parse(&bytes) {
        Ok(header) => {
            if let Err(e) = header.check_sizes(bytes.len() as u64) {
                output.errors.push(JsonError::from(&e));
            }
            output.header = Some(header);
        }
        Err(e) => output.errors.push(JsonError::from(&e)),
    }

    output.success = output.errors.is_empty();
    println!("{}", serde_json::to_string_pretty(&output)?);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
