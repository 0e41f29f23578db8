//! Deterministic WAV file writer.
//!
//! Writes mono PCM WAV files with no timestamps or variable metadata, so two
//! renders of the same config are byte-identical. The writer streams samples
//! into a seekable sink and back-patches the RIFF and data sizes at the end.

mod format;
mod header;
mod pcm;
mod render;
mod writer;


// Re-export public API
pub use format::{WavFormat, HEADER_LEN, PCM_FORMAT_TAG};
pub use header::WavHeader;
pub use pcm::{
    compute_pcm_hash, decode_pcm, extract_pcm_data, max_amplitude, pcm_hash, quantize,
    write_pcm_sample,
};
pub use render::{render, render_to_path, render_to_vec, render_unseekable, RenderSummary};
pub use writer::{PatchedSizes, WavStreamWriter, WriterState};
