//! The parameter record a front end hands to the controller.

use alloc::format;
use alloc::string::{String, ToString};
use thiserror::Error;

use crate::audio_buffer::PLAYBACK_RATE;
use crate::note::NOTE_NAMES;
use crate::scale::ScaleMode;
use crate::waveform::WaveformChoice;

pub const BPM_MIN: u16 = 40;
pub const BPM_MAX: u16 = 300;

pub const DOWNSAMPLE_MIN: u32 = 1000;
pub const DOWNSAMPLE_MAX: u32 = PLAYBACK_RATE;

/// Slider values above this mean "clean" (no downsampling).
pub const CLEAN_THRESHOLD: u32 = 44000;

/// Menu label that switches from generated chords to file playback.
pub const PLAY_FILE_LABEL: &str = "play file";

/// Rejected input at the parameter boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("invalid parameter `{name}`: {value:?}")]
    InvalidParameter { name: &'static str, value: String },
}

impl ParamError {
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        ParamError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

/// Map a raw quality-slider position to a downsample rate.
pub fn downsample_from_slider(value: u32) -> Option<u32> {
    if value > CLEAN_THRESHOLD {
        None
    } else {
        Some(value.clamp(DOWNSAMPLE_MIN, DOWNSAMPLE_MAX))
    }
}

/// Where the audio for a request comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceMode {
    #[default]
    Generated,
    File,
}

/// Chord generation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChordParams {
    pub bpm: u16,
    /// Pitch class of the key, 0 = C.
    pub root_index: u8,
    pub mode: ScaleMode,
    pub waveform: WaveformChoice,
    /// `None` renders at the native rate.
    pub downsample_rate: Option<u32>,
    pub n_chords: usize,
}

impl Default for ChordParams {
    fn default() -> Self {
        Self {
            bpm: 120,
            root_index: 0,
            mode: ScaleMode::Major,
            waveform: WaveformChoice::RandomAll,
            downsample_rate: None,
            n_chords: 32,
        }
    }
}

impl ChordParams {
    /// Saturate every field into its documented range.
    pub fn normalized(self) -> Self {
        Self {
            bpm: self.bpm.clamp(BPM_MIN, BPM_MAX),
            root_index: self.root_index.min(11),
            downsample_rate: self
                .downsample_rate
                .map(|r| r.clamp(DOWNSAMPLE_MIN, DOWNSAMPLE_MAX)),
            ..self
        }
    }

    /// Seconds per chord slot.
    pub fn chord_duration(&self) -> f64 {
        60.0 / self.bpm.max(1) as f64
    }

    /// Display name of the key, e.g. `"C# Minor"`.
    pub fn key_name(&self) -> String {
        format!("{} {}", NOTE_NAMES[self.root_index.min(11) as usize], self.mode)
    }

    /// `"Clean"` or the downsample rate in Hz.
    pub fn quality_label(&self) -> String {
        match self.downsample_rate {
            None => "Clean".to_string(),
            Some(rate) => format!("{}Hz", rate),
        }
    }
}

/// One "start playback" request from a front end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackRequest {
    pub params: ChordParams,
    pub source: SourceMode,
    /// Explicit file to play in file mode; otherwise the controller picks one.
    pub file_path: Option<String>,
    /// Re-render without restarting from the top when already playing.
    pub keep_position: bool,
}

impl PlaybackRequest {
    pub fn generated(params: ChordParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn file(params: ChordParams, file_path: Option<String>) -> Self {
        Self {
            params,
            source: SourceMode::File,
            file_path,
            keep_position: false,
        }
    }

    pub fn keep_position(mut self, keep: bool) -> Self {
        self.keep_position = keep;
        self
    }

    /// Apply a waveform menu selection; [`PLAY_FILE_LABEL`] switches to file mode.
    pub fn select_wave(&mut self, label: &str) {
        if label.trim().eq_ignore_ascii_case(PLAY_FILE_LABEL) {
            self.source = SourceMode::File;
        } else {
            self.source = SourceMode::Generated;
            self.params.waveform = WaveformChoice::from_menu(label);
        }
    }
}
