//! Headless controller for chordwave.
//!
//! Provides the API a front end drives: start playback from a parameter
//! record, tweak volume and speed, and poll a snapshot and status line.
//! Both the CLI and tests go through it.

mod config;
mod controller;
mod engine;
mod status;

pub use config::{ConfigError, PlayerConfig};
pub use controller::PlaybackController;
pub use engine::PlaybackEngine;
pub use status::{
    effective_bpm, live_status, rate_for_speed, speed_cents, speed_label, SPEED_MAX, SPEED_MIN,
};

// Re-export common types so callers don't need the lower crates directly.
pub use cw_audio::{AudioError, AudioOutput, CpalOutput, ManualOutput};
pub use cw_engine::{EngineConfig, PlaybackStatus, PlayerState};
pub use cw_formats::FormatError;
pub use cw_ir::{
    downsample_from_slider, root_index_from_name, Chord, ChordParams, ChordQuality, ParamError,
    PlaybackRequest, ScaleMode, SourceMode, WaveformChoice,
};
