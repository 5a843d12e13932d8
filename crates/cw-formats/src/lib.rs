//! File-backed audio for chordwave.
//!
//! Reads WAV files into mono buffers at the playback rate and catalogs the
//! bundled assets the player can pick from.

mod assets;
mod wav_format;

pub use assets::{AssetLibrary, DEFAULT_ASSETS, MISSING_FILE_SAMPLES};
pub use wav_format::{load_wav, load_wav_at, resample_linear};

use thiserror::Error;

/// Error type for file loading.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file does not exist
    #[error("file not found: {0}")]
    NotFound(String),
    /// The file exists but is not a readable WAV
    #[error("decode error: {0}")]
    Decode(String),
    /// Valid WAV with a sample layout we do not read
    #[error("unsupported format: {0}")]
    Unsupported(String),
    /// I/O error
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
