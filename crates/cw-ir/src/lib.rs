//! Core IR types for the chordwave synthesizer.
//!
//! This crate defines the data model shared by the synthesis, playback and
//! controller crates: sample buffers, chords, scales, waveform pools and the
//! parameter record handed over by a front end. It also carries the scale and
//! note theory everything else builds on.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod audio_buffer;
mod chord;
mod note;
mod params;
mod scale;
mod waveform;

pub use audio_buffer::{PlaybackBuffer, DEFAULT_BLOCK_SIZE, MAX_BLOCK_FRAMES, PLAYBACK_RATE};
pub use chord::{classify_quality, Chord, ChordQuality};
pub use note::{
    midi_to_frequency, nearest_note_name, note_name, root_index_from_name, NoteName, NOTE_NAMES,
    UNKNOWN_NOTE,
};
pub use params::{
    downsample_from_slider, ChordParams, ParamError, PlaybackRequest, SourceMode, BPM_MAX,
    BPM_MIN, CLEAN_THRESHOLD, DOWNSAMPLE_MAX, DOWNSAMPLE_MIN, PLAY_FILE_LABEL,
};
pub use scale::{build_scale, Scale, ScaleMode, ROOT_MIDI_BASE, SCALE_LEN, SCALE_OCTAVES};
pub use waveform::{ToneKind, WaveformChoice};
