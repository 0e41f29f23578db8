//! Canonical 44-byte WAV header parsing.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::error::{AudioError, AudioResult};

use super::format::{FMT_CHUNK_SIZE, HEADER_LEN};

/// Fields of a canonical PCM WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    /// RIFF chunk size (file size minus 8).
    pub riff_size: u32,
    /// Audio format tag (1 = PCM).
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Data chunk size in bytes.
    pub data_size: u32,
}

impl WavHeader {
    /// Parses the header of a file laid out as RIFF, `fmt `, `data` with no
    /// other chunks in between.
    pub fn parse(data: &[u8]) -> AudioResult<Self> {
        if data.len() < HEADER_LEN as usize {
            return Err(AudioError::invalid_header(
                0,
                format!(
                    "file too short: {} bytes (minimum {} required)",
                    data.len(),
                    HEADER_LEN
                ),
            ));
        }

        expect_tag(data, 0, b"RIFF")?;
        expect_tag(data, 8, b"WAVE")?;
        expect_tag(data, 12, b"fmt ")?;

        let fmt_size = LittleEndian::read_u32(&data[16..20]);
        if fmt_size != FMT_CHUNK_SIZE {
            return Err(AudioError::invalid_header(
                16,
                format!("expected fmt chunk size {}, got {}", FMT_CHUNK_SIZE, fmt_size),
            ));
        }

        expect_tag(data, 36, b"data")?;

        Ok(Self {
            riff_size: LittleEndian::read_u32(&data[4..8]),
            audio_format: LittleEndian::read_u16(&data[20..22]),
            channels: LittleEndian::read_u16(&data[22..24]),
            sample_rate: LittleEndian::read_u32(&data[24..28]),
            byte_rate: LittleEndian::read_u32(&data[28..32]),
            block_align: LittleEndian::read_u16(&data[32..34]),
            bits_per_sample: LittleEndian::read_u16(&data[34..36]),
            data_size: LittleEndian::read_u32(&data[40..44]),
        })
    }

    /// Checks both size fields against the real file length.
    pub fn check_sizes(&self, file_len: u64) -> AudioResult<()> {
        if self.riff_size as u64 + 8 != file_len {
            return Err(AudioError::invalid_header(
                4,
                format!(
                    "RIFF size {} does not match file length {}",
                    self.riff_size, file_len
                ),
            ));
        }
        if self.data_size as u64 + HEADER_LEN != file_len {
            return Err(AudioError::invalid_header(
                40,
                format!(
                    "data size {} does not match file length {}",
                    self.data_size, file_len
                ),
            ));
        }
        Ok(())
    }

    /// Number of sample frames in the data chunk.
    pub fn num_samples(&self) -> u64 {
        if self.block_align == 0 {
            0
        } else {
            self.data_size as u64 / self.block_align as u64
        }
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.num_samples() as f64 / self.sample_rate as f64
        }
    }
}

fn expect_tag(data: &[u8], offset: usize, tag: &[u8; 4]) -> AudioResult<()> {
    let found = &data[offset..offset + 4];
    if found == tag {
        Ok(())
    } else {
        Err(AudioError::invalid_header(
            offset,
            format!(
                "expected '{}', got {:?}",
                String::from_utf8_lossy(tag),
                String::from_utf8_lossy(found)
            ),
        ))
    }
}
