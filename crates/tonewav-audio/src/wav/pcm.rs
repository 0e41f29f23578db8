//! PCM quantization, encoding and hashing.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

/// Largest positive sample value for a bit depth: `2^(bits-1) - 1`.
///
/// A depth of zero has no sample values and yields 0.
pub fn max_amplitude(bits_per_sample: u16) -> f64 {
    if bits_per_sample == 0 {
        return 0.0;
    }
    2f64.powi(i32::from(bits_per_sample) - 1) - 1.0
}

/// Converts a real sample to an integer at the given bit depth.
///
/// The sample is scaled by `max_amplitude * attenuation`, clamped to
/// `[-max, max]` and rounded. Out-of-range input never wraps.
pub fn quantize(sample: f64, bits_per_sample: u16, attenuation: f64) -> i32 {
    let max = max_amplitude(bits_per_sample);
    let scaled = sample * max * attenuation;
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(-max, max).round() as i32
}

/// Writes one quantized sample as little-endian PCM.
///
/// 8-bit PCM is unsigned with a 128 offset; wider depths are signed.
pub fn write_pcm_sample<W: Write>(
    writer: &mut W,
    value: i32,
    bits_per_sample: u16,
) -> io::Result<()> {
    match bits_per_sample {
        8 => writer.write_u8((value + 128) as u8),
        16 => writer.write_i16::<LittleEndian>(value as i16),
        24 => writer.write_i24::<LittleEndian>(value),
        32 => writer.write_i32::<LittleEndian>(value),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported bit depth: {}", other),
        )),
    }
}

/// Decodes a little-endian PCM data region back into integers.
pub fn decode_pcm(pcm: &[u8], bits_per_sample: u16) -> Vec<i32> {
    match bits_per_sample {
        8 => pcm.iter().map(|&b| b as i32 - 128).collect(),
        16 => pcm
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]) as i32)
            .collect(),
        24 => pcm
            .chunks_exact(3)
            .map(|c| i32::from_le_bytes([0, c[0], c[1], c[2]]) >> 8)
            .collect(),
        32 => pcm
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
        _ => Vec::new(),
    }
}

/// Extracts PCM data from a WAV file buffer.
///
/// Walks the chunk list, so files with extra chunks before `data` are handled.
/// Returns None if the format is invalid.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 {
        return None;
    }

    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        if chunk_id == b"data" {
            let data_start = pos + 8;
            let data_end = data_start.checked_add(chunk_size)?;
            return wav_data.get(data_start..data_end);
        }

        // Chunks are word aligned
        pos += 8 + chunk_size + (chunk_size & 1);
    }

    None
}

/// BLAKE3 hash of a PCM data region, as hex.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Computes the PCM hash of a complete WAV file.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(pcm_hash)
}
