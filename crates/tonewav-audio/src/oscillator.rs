//! Sine oscillator and the sample source abstraction the writer pulls from.

use std::f64::consts::PI;

use crate::config::AudioConfig;

/// 2π, one full cycle in radians.
pub const TWO_PI: f64 = 2.0 * PI;

/// Anything that yields one real-valued sample per call.
///
/// Samples are pulled strictly in order, once per output frame. There is no
/// way to rewind a source.
pub trait SampleSource {
    /// Produces the next sample, nominally in [-1.0, 1.0].
    fn next_sample(&mut self) -> f64;
}

impl<F: FnMut() -> f64> SampleSource for F {
    fn next_sample(&mut self) -> f64 {
        self()
    }
}

/// Fixed-frequency sine oscillator.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    frequency: f64,
    amplitude: f64,
    angle: f64,
    increment: f64,
}

impl SineOscillator {
    /// Creates an oscillator at `frequency` Hz with the sample rate of
    /// `config`.
    ///
    /// The phase increment `2π·frequency/sample_rate` is fixed for the
    /// lifetime of the oscillator.
    pub fn new(frequency: f64, amplitude: f64, config: &AudioConfig) -> Self {
        Self::with_sample_rate(frequency, amplitude, config.sample_rate)
    }

    /// Creates an oscillator from the shared render config.
    pub fn from_config(config: &AudioConfig) -> Self {
        Self::new(config.frequency, config.amplitude, config)
    }

    fn with_sample_rate(frequency: f64, amplitude: f64, sample_rate: u32) -> Self {
        Self {
            frequency,
            amplitude,
            angle: 0.0,
            increment: TWO_PI * frequency / sample_rate as f64,
        }
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Output amplitude.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Phase advance per sample, in radians.
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Current phase angle, always in [0, 2π).
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl SampleSource for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = self.amplitude * self.angle.sin();

        self.angle += self.increment;
        if self.angle >= TWO_PI {
            self.angle = self.angle.rem_euclid(TWO_PI);
        }

        sample
    }
}
