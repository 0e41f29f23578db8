//! WAV file format parameters.

use crate::config::{AudioConfig, SUPPORTED_BIT_DEPTHS};
use crate::error::{AudioError, AudioResult};

/// Size of the canonical RIFF + `fmt ` + `data` header in bytes.
pub const HEADER_LEN: u64 = 44;

/// Payload size of a PCM `fmt ` chunk.
pub(crate) const FMT_CHUNK_SIZE: u32 = 16;

/// Audio format tag for linear PCM.
pub const PCM_FORMAT_TAG: u16 = 1;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (always 1 for this implementation).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono WAV format.
    pub fn mono(sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Creates the format described by a render config.
    pub fn from_config(config: &AudioConfig) -> Self {
        Self::mono(config.sample_rate, config.bit_depth)
    }

    /// Calculates bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub fn block_align(&self) -> u16 {
        self.bits_per_sample * self.channels / 8
    }

    /// Calculates byte rate (bytes per second).
    ///
    /// Widened to `u64`; the header field only holds 32 bits, see
    /// [`WavFormat::validate`].
    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.bits_per_sample as u64 * self.channels as u64 / 8
    }

    /// Checks that the format can be encoded and described by a PCM header.
    pub fn validate(&self) -> AudioResult<()> {
        if self.channels == 0 {
            return Err(AudioError::config("channels", "must be at least 1"));
        }
        if self.sample_rate == 0 {
            return Err(AudioError::config("sample_rate", "must be greater than zero"));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(AudioError::config(
                "bit_depth",
                format!("must be one of 8, 16, 24 or 32, got {}", self.bits_per_sample),
            ));
        }
        if self.byte_rate() > u32::MAX as u64 {
            return Err(AudioError::config(
                "sample_rate",
                format!(
                    "{} Hz at {} bits needs a byte rate of {}, the header allows at most {}",
                    self.sample_rate,
                    self.bits_per_sample,
                    self.byte_rate(),
                    u32::MAX
                ),
            ));
        }
        Ok(())
    }
}
