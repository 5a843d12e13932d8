//! Offline synthesis for chordwave.
//!
//! Everything here runs on the control side: it allocates freely and hands
//! finished sample buffers to the playback engine.

mod downsample;
mod sequencer;
pub mod tone;

pub use downsample::{block_downsample, stretch_to_rate};
pub use sequencer::{ChordSequencer, Sequence, FADE_SAMPLES, MIX_GAIN};
pub use tone::{generate_tone, sample_count, DEFAULT_AMPLITUDE};
