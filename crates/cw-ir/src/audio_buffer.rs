//! Mono f32 playback buffer.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

/// Native output rate. Generated chords and loaded files are rendered at this rate.
pub const PLAYBACK_RATE: u32 = 44100;

/// Default number of frames the output subsystem requests per callback.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Largest block the real-time path handles in one call.
/// Device buffers larger than this are split before they reach the player.
pub const MAX_BLOCK_FRAMES: usize = 4096;

/// An owned mono sample sequence, immutable once built.
///
/// Samples are expected in `[-1, 1]`. The buffer is boxed so that handing it
/// to the real-time side moves a pointer and a length, never the data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackBuffer {
    samples: Box<[f32]>,
}

impl PlaybackBuffer {
    /// Wrap already-rendered samples.
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into_boxed_slice(),
        }
    }

    /// Create a silent buffer of `len` samples.
    pub fn silence(len: usize) -> Self {
        Self::new(vec![0.0; len])
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only access to the sample data.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl From<Vec<f32>> for PlaybackBuffer {
    fn from(samples: Vec<f32>) -> Self {
        Self::new(samples)
    }
}
