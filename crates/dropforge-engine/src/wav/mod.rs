//! Deterministic WAV container writer.
//!
//! Output is mono 16-bit PCM with a fixed 44-byte header and no metadata
//! chunks, so identical samples always give identical files. The BLAKE3 hash
//! of the PCM payload identifies a render independently of the header.

mod format;
mod pcm;
mod result;
mod writer;


pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{pcm16_bytes, wav_header, write_wav, write_wav_to_vec, HEADER_LEN};
