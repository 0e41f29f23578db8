//! Drives an oscillator through the WAV writer.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};

use serde::Serialize;

use crate::config::AudioConfig;
use crate::error::{AudioError, AudioResult, WritePhase};
use crate::oscillator::{SampleSource, SineOscillator};

use super::format::{WavFormat, HEADER_LEN};
use super::writer::WavStreamWriter;

/// What a render produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    /// Samples written to the data chunk.
    pub num_samples: u64,
    /// Size of the data region in bytes.
    pub data_bytes: u32,
    /// Total file size in bytes.
    pub file_bytes: u64,
}

/// Renders `config.num_samples()` samples from `source` into `sink`.
///
/// The config is validated first; nothing is written if it is invalid.
pub fn render<S, W>(source: &mut S, config: &AudioConfig, sink: W) -> AudioResult<RenderSummary>
where
    S: SampleSource + ?Sized,
    W: Write + Seek,
{
    config.validate()?;

    let mut writer = WavStreamWriter::new(sink, WavFormat::from_config(config), config.attenuation);
    writer.write_header()?;
    writer.begin_data()?;

    let num_samples = config.num_samples();
    for _ in 0..num_samples {
        writer.write_sample(source.next_sample())?;
    }

    let sizes = writer.patch_sizes()?;
    writer.close()?;

    Ok(RenderSummary {
        num_samples,
        data_bytes: sizes.data_size,
        file_bytes: HEADER_LEN + sizes.data_size as u64,
    })
}

/// Renders the configured sine tone to `config.output_path`.
///
/// The write is not atomic. If it fails after the file was created, the
/// partial file is left on disk.
pub fn render_to_path(config: &AudioConfig) -> AudioResult<RenderSummary> {
    // No file is created for an invalid config
    config.validate()?;

    let file = File::create(&config.output_path).map_err(|e| AudioError::io(WritePhase::Open, e))?;
    let mut sink = BufWriter::new(file);

    let mut oscillator = SineOscillator::from_config(config);
    let summary = render(&mut oscillator, config, &mut sink)?;

    let file = sink
        .into_inner()
        .map_err(|e| AudioError::io(WritePhase::Close, e.into_error()))?;
    file.sync_all()
        .map_err(|e| AudioError::io(WritePhase::Close, e))?;

    Ok(summary)
}

/// Renders the configured sine tone to a byte vector.
pub fn render_to_vec(config: &AudioConfig) -> AudioResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let mut oscillator = SineOscillator::from_config(config);
    render(&mut oscillator, config, &mut buffer)?;
    Ok(buffer.into_inner())
}

/// Renders to a sink that cannot seek, such as a pipe or stdout.
///
/// The whole file is assembled in memory so the sizes can be patched, then
/// copied out in one go.
pub fn render_unseekable<W: Write>(config: &AudioConfig, mut out: W) -> AudioResult<RenderSummary> {
    let mut buffer = Cursor::new(Vec::new());
    let mut oscillator = SineOscillator::from_config(config);
    let summary = render(&mut oscillator, config, &mut buffer)?;

    let io = |e| AudioError::io(WritePhase::Copy, e);
    out.write_all(buffer.get_ref()).map_err(io)?;
    out.flush().map_err(io)?;

    Ok(summary)
}
