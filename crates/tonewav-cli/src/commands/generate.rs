//! Generate command implementation
//!
//! Renders a sine tone to a WAV file (or to stdout) from a config file and
//! command-line overrides.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tonewav_audio::wav::compute_pcm_hash;
use tonewav_audio::{render_to_path, render_unseekable, AudioConfig, AudioError, RenderSummary};

use super::json_output::{error_codes, GenerateOutput, GenerateResult, JsonError};

/// Output path that selects stdout.
pub const STDOUT_PATH: &str = "-";

/// Config values given on the command line. Each one that is set replaces the
/// value from the config file (or the default).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Tone frequency in Hz
    pub frequency: Option<f64>,
    /// Oscillator amplitude
    pub amplitude: Option<f64>,
    /// Duration in seconds
    pub duration_seconds: Option<f64>,
    /// Sample rate in Hz
    pub sample_rate: Option<u32>,
    /// Bits per sample
    pub bit_depth: Option<u16>,
    /// Output gain applied when quantizing
    pub attenuation: Option<f64>,
    /// Output file, or `-` for stdout
    pub output_path: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Applies every set override to `config`.
    pub fn apply(&self, config: &mut AudioConfig) {
        if let Some(frequency) = self.frequency {
            config.frequency = frequency;
        }
        if let Some(amplitude) = self.amplitude {
            config.amplitude = amplitude;
        }
        if let Some(duration) = self.duration_seconds {
            config.duration_seconds = duration;
        }
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(bits) = self.bit_depth {
            config.bit_depth = bits;
        }
        if let Some(attenuation) = self.attenuation {
            config.attenuation = attenuation;
        }
        if let Some(ref path) = self.output_path {
            config.output_path = path.clone();
        }
    }
}

/// Builds the effective config: file (or defaults), then overrides.
///
/// The result is not validated; rendering does that.
pub fn load_config(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<AudioConfig> {
    let mut config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            AudioConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => AudioConfig::default(),
    };
    overrides.apply(&mut config);
    Ok(config)
}

/// Returns true when the config asks for the file on stdout.
pub fn is_stdout(path: &Path) -> bool {
    path == Path::new(STDOUT_PATH)
}

/// Maps a render error to the process exit code.
///
/// 1 for configuration errors, 2 for I/O and everything else.
pub fn exit_code_for(err: &AudioError) -> ExitCode {
    match err {
        AudioError::Config { .. } => ExitCode::from(1),
        _ => ExitCode::from(2),
    }
}

/// Run the generate command
///
/// # Arguments
/// * `config_path` - Optional JSON config file
/// * `overrides` - Values given as flags
/// * `json_output` - Whether to output machine-readable JSON diagnostics
/// * `verbose` - Whether to print a summary on success
///
/// # Returns
/// Exit code: 0 success, 1 config error, 2 I/O error
pub fn run(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    json_output: bool,
    verbose: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(config_path, overrides)
    } else {
        run_human(config_path, overrides, verbose)
    }
}

/// Run generate with human-readable (colored) output on stderr
fn run_human(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    verbose: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path.map(Path::new), overrides)?;

    for warning in config.warnings() {
        eprintln!("  {} {}", "!".yellow(), warning);
    }

    let result = if is_stdout(&config.output_path) {
        render_unseekable(&config, io::stdout().lock())
    } else {
        render_to_path(&config)
    };

    match result {
        Ok(summary) => {
            if verbose {
                print_summary(&config, &summary, start.elapsed().as_millis() as u64);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            Ok(exit_code_for(&e))
        }
    }
}

fn print_summary(config: &AudioConfig, summary: &RenderSummary, duration_ms: u64) {
    eprintln!(
        "{} {}",
        "Wrote:".cyan().bold(),
        config.output_path.display()
    );
    eprintln!(
        "  {} {} Hz, amplitude {}, {} s",
        "Tone:".dimmed(),
        config.frequency,
        config.amplitude,
        config.duration_seconds
    );
    eprintln!(
        "  {} {} Hz, {}-bit mono PCM",
        "Format:".dimmed(),
        config.sample_rate,
        config.bit_depth
    );
    eprintln!(
        "  {} {} samples, {} data bytes, {} bytes total",
        "Size:".dimmed(),
        summary.num_samples,
        summary.data_bytes,
        summary.file_bytes
    );
    eprintln!("\n{} ({}ms)", "SUCCESS".green().bold(), duration_ms);
}

/// Run generate with machine-readable JSON output on stdout
fn run_json(config_path: Option<&str>, overrides: &ConfigOverrides) -> Result<ExitCode> {
    let start = Instant::now();

    let mut config = match config_path {
        Some(path) => {
            let json = match fs::read_to_string(path) {
                Ok(json) => json,
                Err(e) => {
                    let error = JsonError::new(
                        error_codes::FILE_READ,
                        format!("Failed to read config file {}: {}", path, e),
                    );
                    return print_failure(vec![error], vec![], ExitCode::from(1));
                }
            };
            match AudioConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    let error = JsonError::new(error_codes::CONFIG_PARSE, e.to_string());
                    return print_failure(vec![error], vec![], ExitCode::from(1));
                }
            }
        }
        None => AudioConfig::default(),
    };
    overrides.apply(&mut config);

    if is_stdout(&config.output_path) {
        let error = JsonError::new(
            error_codes::INVALID_ARGS,
            "--json reports on stdout and cannot be combined with --output -",
        );
        return print_failure(vec![error], vec![], ExitCode::from(1));
    }

    let mut warnings = config.warnings();
    let summary = match render_to_path(&config) {
        Ok(summary) => summary,
        Err(e) => {
            let code = exit_code_for(&e);
            return print_failure(vec![JsonError::from(&e)], warnings, code);
        }
    };

    let pcm_hash = read_back_pcm_hash(&config.output_path, &mut warnings);

    let result = GenerateResult {
        config,
        summary,
        pcm_hash,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    let output = GenerateOutput::success(result, warnings);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(ExitCode::SUCCESS)
}

/// Hashes the PCM data of a file that was just written. A file that cannot
/// be read back does not fail the command, but leaves a warning.
fn read_back_pcm_hash(path: &Path, warnings: &mut Vec<String>) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => {
            let hash = compute_pcm_hash(&bytes);
            if hash.is_none() {
                warnings.push(format!(
                    "no data chunk found in {}, PCM hash omitted",
                    path.display()
                ));
            }
            hash
        }
        Err(e) => {
            warnings.push(format!(
                "could not read back {} to hash its PCM data: {}",
                path.display(),
                e
            ));
            None
        }
    }
}

fn print_failure(errors: Vec<JsonError>, warnings: Vec<String>, code: ExitCode) -> Result<ExitCode> {
    let output = GenerateOutput::failure(errors, warnings);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_overrides_replace_only_set_fields() {
        let mut config = AudioConfig::default();
        let overrides = ConfigOverrides {
            frequency: Some(1000.0),
            bit_depth: Some(24),
            output_path: Some(PathBuf::from("out.wav")),
            ..ConfigOverrides::default()
        };
        overrides.apply(&mut config);

        assert_eq!(
            config,
            AudioConfig {
                frequency: 1000.0,
                bit_depth: 24,
                output_path: PathBuf::from("out.wav"),
                ..AudioConfig::default()
            }
        );
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        let config = load_config(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, AudioConfig::default());
    }

    #[test]
    fn test_load_config_file_then_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.json");
        fs::write(&path, r#"{"frequency": 220.0, "sample_rate": 22050}"#).unwrap();

        let overrides = ConfigOverrides {
            sample_rate: Some(48000),
            ..ConfigOverrides::default()
        };
        let config = load_config(Some(path.as_path()), &overrides).unwrap();
        assert_eq!(config.frequency, 220.0);
        assert_eq!(config.sample_rate, 48000);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/tone.json")), &ConfigOverrides::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config(Some(path.as_path()), &ConfigOverrides::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_is_stdout() {
        assert!(is_stdout(Path::new("-")));
        assert!(!is_stdout(Path::new("waveform.wav")));
    }

    #[test]
    fn test_exit_codes() {
        let config_err = AudioError::config("frequency", "bad");
        assert_eq!(exit_code_for(&config_err), ExitCode::from(1));

        let io_err = AudioError::io(
            tonewav_audio::WritePhase::Open,
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(exit_code_for(&io_err), ExitCode::from(2));
    }

    #[test]
    fn test_read_back_hash_of_rendered_file() {
        let dir = tempdir().unwrap();
        let config = AudioConfig {
            duration_seconds: 0.01,
            output_path: dir.path().join("tone.wav"),
            ..AudioConfig::default()
        };
        render_to_path(&config).unwrap();

        let mut warnings = Vec::new();
        let hash = read_back_pcm_hash(&config.output_path, &mut warnings);
        assert_eq!(hash.map(|h| h.len()), Some(64));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_read_back_failure_leaves_warning() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.wav");

        let mut warnings = vec!["earlier".to_string()];
        assert_eq!(read_back_pcm_hash(&missing, &mut warnings), None);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].contains("could not read back"), "{:?}", warnings);

        let not_wav = dir.path().join("not.wav");
        fs::write(&not_wav, b"plain text").unwrap();
        let mut warnings = Vec::new();
        assert_eq!(read_back_pcm_hash(&not_wav, &mut warnings), None);
        assert!(warnings[0].contains("PCM hash omitted"));
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let overrides = ConfigOverrides {
            duration_seconds: Some(0.1),
            output_path: Some(path.clone()),
            ..ConfigOverrides::default()
        };

        let code = run(None, &overrides, false, false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(fs::metadata(&path).unwrap().len(), 44 + 4410 * 2);
    }

    #[test]
    fn test_run_invalid_config_exits_1() {
        let dir = tempdir().unwrap();
        let overrides = ConfigOverrides {
            bit_depth: Some(12),
            output_path: Some(dir.path().join("tone.wav")),
            ..ConfigOverrides::default()
        };

        let code = run(None, &overrides, false, false).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_run_unwritable_path_exits_2() {
        let dir = tempdir().unwrap();
        let overrides = ConfigOverrides {
            duration_seconds: Some(0.1),
            output_path: Some(dir.path().join("no").join("such").join("tone.wav")),
            ..ConfigOverrides::default()
        };

        let code = run(None, &overrides, true, false).unwrap();
        assert_eq!(code, ExitCode::from(2));
    }
}
