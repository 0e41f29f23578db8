//! tonewav Audio Backend
//!
//! Synthesizes a single sine tone and writes it as an uncompressed mono PCM
//! RIFF/WAVE file.
//!
//! # Overview
//!
//! Two pieces compose linearly:
//!
//! - **Oscillator** - a stateful sine generator pulled one sample at a time
//! - **Container writer** - a streaming WAV writer that reserves the RIFF and
//!   data size fields, appends samples, then seeks back to patch both sizes
//!
//! Both read their sample rate from the same [`AudioConfig`], so the pitch of
//! the tone and the rate declared in the header always agree.
//!
//! # Determinism
//!
//! Output carries no timestamps or random data. Rendering the same config
//! twice produces byte-identical files.
//!
//! # Example
//!
//! ```no_run
//! use tonewav_audio::{render_to_path, AudioConfig};
//!
//! let config = AudioConfig {
//!     frequency: 440.0,
//!     duration_seconds: 2.0,
//!     ..AudioConfig::default()
//! };
//! let summary = render_to_path(&config)?;
//! assert_eq!(summary.file_bytes, 176444);
//! # Ok::<(), tonewav_audio::AudioError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`config`] - Render parameters and validation
//! - [`oscillator`] - Sine oscillator and the [`SampleSource`] trait
//! - [`wav`] - WAV format, streaming writer, header parsing
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod oscillator;
pub mod wav;

// Re-export main types at crate root
pub use config::AudioConfig;
pub use error::{AudioError, AudioResult, WritePhase};
pub use oscillator::{SampleSource, SineOscillator};
pub use wav::{
    render, render_to_path, render_to_vec, render_unseekable, RenderSummary, WavFormat, WavHeader,
    WavStreamWriter, WriterState,
};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_default_render_sizes() {
        let wav = render_to_vec(&AudioConfig::default()).expect("render should succeed");

        assert_eq!(wav.len(), 176444);
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 176436);
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 176400);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let config = AudioConfig {
            frequency: -1.0,
            ..AudioConfig::default()
        };
        let err = render_to_vec(&config).unwrap_err();
        assert!(matches!(err, AudioError::Config { field: "frequency", .. }));
    }
}
