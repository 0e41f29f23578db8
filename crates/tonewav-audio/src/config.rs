//! Render configuration shared by the oscillator and the WAV writer.
//!
//! The sample rate lives only here. Both the oscillator's phase increment and
//! the header's byte rate are derived from the same `AudioConfig`, so the two
//! can never disagree.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};
use crate::wav::WavFormat;

/// Default tone frequency in Hz (concert A).
pub const DEFAULT_FREQUENCY: f64 = 440.0;
/// Default oscillator amplitude.
pub const DEFAULT_AMPLITUDE: f64 = 0.5;
/// Default duration in seconds.
pub const DEFAULT_DURATION_SECONDS: f64 = 2.0;
/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default bit depth.
pub const DEFAULT_BIT_DEPTH: u16 = 16;
/// Default output attenuation applied on top of the amplitude.
pub const DEFAULT_ATTENUATION: f64 = 0.01;
/// Default output file.
pub const DEFAULT_OUTPUT_PATH: &str = "waveform.wav";

/// Bit depths the encoder knows how to write.
pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Largest data region that still fits the 32-bit RIFF size field.
const MAX_DATA_BYTES: u64 = u32::MAX as u64 - 36;

/// Parameters for a single tone render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Tone frequency in Hz.
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    /// Oscillator amplitude in [0, 1].
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Duration of the render in seconds.
    #[serde(default = "default_duration", alias = "durationSeconds")]
    pub duration_seconds: f64,
    /// Sample rate in Hz.
    #[serde(default = "default_sample_rate", alias = "sampleRate")]
    pub sample_rate: u32,
    /// Bits per sample (8, 16, 24 or 32).
    #[serde(default = "default_bit_depth", alias = "bitDepth")]
    pub bit_depth: u16,
    /// Output gain in (0, 1] applied when quantizing.
    #[serde(default = "default_attenuation")]
    pub attenuation: f64,
    /// Destination file.
    #[serde(default = "default_output_path", alias = "outputPath")]
    pub output_path: PathBuf,
}

fn default_frequency() -> f64 {
    DEFAULT_FREQUENCY
}

fn default_amplitude() -> f64 {
    DEFAULT_AMPLITUDE
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECONDS
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_bit_depth() -> u16 {
    DEFAULT_BIT_DEPTH
}

fn default_attenuation() -> f64 {
    DEFAULT_ATTENUATION
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
            attenuation: DEFAULT_ATTENUATION,
            output_path: default_output_path(),
        }
    }
}

impl AudioConfig {
    /// Parses a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> AudioResult<Self> {
        serde_json::from_str(json).map_err(|e| AudioError::config("json", e.to_string()))
    }

    /// Checks every parameter, returning the first violation.
    pub fn validate(&self) -> AudioResult<()> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(AudioError::config(
                "frequency",
                format!("must be a positive number of Hz, got {}", self.frequency),
            ));
        }

        if !self.amplitude.is_finite() || !(0.0..=1.0).contains(&self.amplitude) {
            return Err(AudioError::config(
                "amplitude",
                format!("must be within [0, 1], got {}", self.amplitude),
            ));
        }

        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(AudioError::config(
                "duration_seconds",
                format!("must be zero or positive, got {}", self.duration_seconds),
            ));
        }

        if self.sample_rate == 0 {
            return Err(AudioError::config("sample_rate", "must be greater than zero"));
        }

        if self.bit_depth % 8 != 0 {
            return Err(AudioError::config(
                "bit_depth",
                format!("must be a multiple of 8, got {}", self.bit_depth),
            ));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(AudioError::config(
                "bit_depth",
                format!("must be one of 8, 16, 24 or 32, got {}", self.bit_depth),
            ));
        }

        WavFormat::from_config(self).validate()?;

        if !self.attenuation.is_finite() || self.attenuation <= 0.0 || self.attenuation > 1.0 {
            return Err(AudioError::config(
                "attenuation",
                format!("must be within (0, 1], got {}", self.attenuation),
            ));
        }

        let data_bytes = self.num_samples() as u128 * self.bytes_per_sample() as u128;
        if data_bytes > MAX_DATA_BYTES as u128 {
            return Err(AudioError::config(
                "duration_seconds",
                format!(
                    "{} s at {} Hz needs {} data bytes, RIFF allows at most {}",
                    self.duration_seconds, self.sample_rate, data_bytes, MAX_DATA_BYTES
                ),
            ));
        }

        Ok(())
    }

    /// Non-fatal problems worth reporting to the user.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let nyquist = self.nyquist();
        if self.frequency >= nyquist {
            warnings.push(format!(
                "frequency {} Hz is at or above the Nyquist limit ({} Hz) and will alias",
                self.frequency, nyquist
            ));
        }
        if self.amplitude == 0.0 {
            warnings.push("amplitude is 0, output will be silent".to_string());
        }

        warnings
    }

    /// Number of samples the render produces.
    pub fn num_samples(&self) -> u64 {
        (self.sample_rate as f64 * self.duration_seconds).round() as u64
    }

    /// Bytes per encoded sample.
    pub fn bytes_per_sample(&self) -> u16 {
        self.bit_depth / 8
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }
}
