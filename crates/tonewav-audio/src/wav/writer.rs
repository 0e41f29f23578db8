//! Streaming WAV writer with back-patched chunk sizes.
//!
//! RIFF stores the sizes of the whole file and of the data chunk up front, but
//! neither is known until every sample has been written. The writer reserves
//! both fields with placeholders, streams samples forward, then seeks back
//! and overwrites them.

use std::fmt;
use std::io::{Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{AudioError, AudioResult, WritePhase};

use super::format::{WavFormat, FMT_CHUNK_SIZE, PCM_FORMAT_TAG};
use super::pcm::{quantize, write_pcm_sample};

/// Placeholder written into size fields before they are known.
const SIZE_PLACEHOLDER: u32 = 0;

/// Lifecycle of a [`WavStreamWriter`].
///
/// Transitions only move forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Sink acquired, nothing written.
    Unopened,
    /// RIFF header and `fmt ` chunk written.
    HeaderWritten,
    /// `data` preamble written, samples being appended.
    DataWriting,
    /// Both size fields overwritten with their final values.
    SizePatched,
    /// Sink flushed and released. Terminal.
    Closed,
}

impl WriterState {
    /// Returns the state name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriterState::Unopened => "unopened",
            WriterState::HeaderWritten => "header-written",
            WriterState::DataWriting => "data-writing",
            WriterState::SizePatched => "size-patched",
            WriterState::Closed => "closed",
        }
    }
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final sizes recorded by [`WavStreamWriter::patch_sizes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchedSizes {
    /// Value written into the RIFF chunk size field.
    pub riff_size: u32,
    /// Value written into the data chunk size field.
    pub data_size: u32,
}

/// Mono PCM WAV writer over a seekable sink.
#[derive(Debug)]
pub struct WavStreamWriter<W: Write + Seek> {
    sink: W,
    format: WavFormat,
    attenuation: f64,
    state: WriterState,
    riff_start: u64,
    data_start: u64,
    samples_written: u64,
}

impl<W: Write + Seek> WavStreamWriter<W> {
    /// Wraps a sink. The file is laid out starting at the sink's current
    /// position.
    pub fn new(sink: W, format: WavFormat, attenuation: f64) -> Self {
        Self {
            sink,
            format,
            attenuation,
            state: WriterState::Unopened,
            riff_start: 0,
            data_start: 0,
            samples_written: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Format the writer was created with.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Number of samples appended so far.
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Writes the RIFF header (with a placeholder size) and the `fmt ` chunk.
    ///
    /// A format the header cannot describe fails with a config error before
    /// anything is written.
    pub fn write_header(&mut self) -> AudioResult<()> {
        self.expect_state(WriterState::Unopened, "write the header")?;
        self.format.validate()?;

        let io = |e| AudioError::io(WritePhase::Header, e);
        self.riff_start = self.sink.stream_position().map_err(io)?;

        let format = self.format;
        let sink = &mut self.sink;

        // RIFF header
        sink.write_all(b"RIFF").map_err(io)?;
        sink.write_u32::<LittleEndian>(SIZE_PLACEHOLDER).map_err(io)?;
        sink.write_all(b"WAVE").map_err(io)?;

        // fmt chunk
        sink.write_all(b"fmt ").map_err(io)?;
        sink.write_u32::<LittleEndian>(FMT_CHUNK_SIZE).map_err(io)?;
        sink.write_u16::<LittleEndian>(PCM_FORMAT_TAG).map_err(io)?;
        sink.write_u16::<LittleEndian>(format.channels).map_err(io)?;
        sink.write_u32::<LittleEndian>(format.sample_rate).map_err(io)?;
        let byte_rate = u32::try_from(format.byte_rate())
            .map_err(|_| AudioError::config("sample_rate", "byte rate does not fit in 32 bits"))?;
        sink.write_u32::<LittleEndian>(byte_rate).map_err(io)?;
        sink.write_u16::<LittleEndian>(format.block_align()).map_err(io)?;
        sink.write_u16::<LittleEndian>(format.bits_per_sample).map_err(io)?;

        self.state = WriterState::HeaderWritten;
        Ok(())
    }

    /// Writes the `data` chunk id and a placeholder size, and records where
    /// the sample bytes begin.
    pub fn begin_data(&mut self) -> AudioResult<()> {
        self.expect_state(WriterState::HeaderWritten, "begin the data chunk")?;

        let io = |e| AudioError::io(WritePhase::Header, e);
        self.sink.write_all(b"data").map_err(io)?;
        self.sink
            .write_u32::<LittleEndian>(SIZE_PLACEHOLDER)
            .map_err(io)?;
        self.data_start = self.sink.stream_position().map_err(io)?;

        self.state = WriterState::DataWriting;
        Ok(())
    }

    /// Quantizes one sample and appends it to the data region.
    pub fn write_sample(&mut self, sample: f64) -> AudioResult<()> {
        self.expect_state(WriterState::DataWriting, "write a sample")?;

        let bits = self.format.bits_per_sample;
        let value = quantize(sample, bits, self.attenuation);
        write_pcm_sample(&mut self.sink, value, bits)
            .map_err(|e| AudioError::io(WritePhase::Samples, e))?;

        self.samples_written += 1;
        Ok(())
    }

    /// Seeks back and overwrites the data size, then the RIFF size.
    ///
    /// The cursor is returned to the end of the data region afterwards.
    pub fn patch_sizes(&mut self) -> AudioResult<PatchedSizes> {
        self.expect_state(WriterState::DataWriting, "patch sizes")?;

        let io = |e| AudioError::io(WritePhase::Patch, e);
        let data_end = self.sink.stream_position().map_err(io)?;

        let data_size = u32::try_from(data_end - self.data_start).map_err(|_| {
            io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "data region exceeds the 32-bit RIFF size limit",
            ))
        })?;
        let riff_size = u32::try_from(data_end - self.riff_start - 8).map_err(|_| {
            io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "file exceeds the 32-bit RIFF size limit",
            ))
        })?;

        self.sink
            .seek(SeekFrom::Start(self.data_start - 4))
            .map_err(io)?;
        self.sink.write_u32::<LittleEndian>(data_size).map_err(io)?;

        self.sink
            .seek(SeekFrom::Start(self.riff_start + 4))
            .map_err(io)?;
        self.sink.write_u32::<LittleEndian>(riff_size).map_err(io)?;

        self.sink.seek(SeekFrom::Start(data_end)).map_err(io)?;

        self.state = WriterState::SizePatched;
        Ok(PatchedSizes {
            riff_size,
            data_size,
        })
    }

    /// Flushes the sink and hands it back.
    pub fn close(mut self) -> AudioResult<W> {
        self.expect_state(WriterState::SizePatched, "close")?;

        self.sink
            .flush()
            .map_err(|e| AudioError::io(WritePhase::Close, e))?;

        self.state = WriterState::Closed;
        Ok(self.sink)
    }

    fn expect_state(&self, expected: WriterState, operation: &'static str) -> AudioResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AudioError::InvalidState {
                operation,
                state: self.state.as_str(),
            })
        }
    }
}
