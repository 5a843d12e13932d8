//! Scale construction over MIDI note numbers.

use core::fmt;
use core::ops::Range;
use core::str::FromStr;

use crate::params::ParamError;

/// MIDI note of root index 0 (C3).
pub const ROOT_MIDI_BASE: u8 = 48;

/// Number of consecutive octaves a scale spans.
pub const SCALE_OCTAVES: usize = 4;

const DEGREES_PER_OCTAVE: usize = 7;

/// Number of notes in a built scale.
pub const SCALE_LEN: usize = SCALE_OCTAVES * DEGREES_PER_OCTAVE;

/// Scale degrees above the root used for the third and fifth of a triad.
const THIRD_OFFSET: usize = 2;
const FIFTH_OFFSET: usize = 4;

/// Diatonic mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleMode {
    #[default]
    Major,
    Minor,
}

impl ScaleMode {
    /// Semitone offsets of each degree from the octave root.
    pub const fn intervals(self) -> [u8; DEGREES_PER_OCTAVE] {
        match self {
            ScaleMode::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleMode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScaleMode::Major => "Major",
            ScaleMode::Minor => "Minor",
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleMode {
    type Err = ParamError;

    /// Only `Major` and `Minor` have interval tables; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("major") {
            Ok(ScaleMode::Major)
        } else if s.eq_ignore_ascii_case("minor") {
            Ok(ScaleMode::Minor)
        } else {
            Err(ParamError::invalid("mode", s))
        }
    }
}

/// An ascending run of MIDI notes spanning [`SCALE_OCTAVES`] octaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    notes: heapless::Vec<u8, SCALE_LEN>,
}

impl Scale {
    /// MIDI notes in ascending order.
    pub fn notes(&self) -> &[u8] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// MIDI note at a scale position.
    pub fn get(&self, degree: usize) -> Option<u8> {
        self.notes.get(degree).copied()
    }

    /// Degrees that can root a triad: the fifth (`degree + 4`) must still be in the scale.
    pub fn root_degrees(&self) -> Range<usize> {
        0..self.notes.len().saturating_sub(FIFTH_OFFSET)
    }

    /// MIDI notes of the triad stacked on `degree`, or `None` if it runs off the top.
    pub fn triad(&self, degree: usize) -> Option<[u8; 3]> {
        Some([
            self.get(degree)?,
            self.get(degree + THIRD_OFFSET)?,
            self.get(degree + FIFTH_OFFSET)?,
        ])
    }
}

/// Build the scale rooted at `ROOT_MIDI_BASE + root_index`.
///
/// `root_index` is a pitch class and saturates at 11 (B).
pub fn build_scale(root_index: u8, mode: ScaleMode) -> Scale {
    let root = ROOT_MIDI_BASE + root_index.min(11);
    let mut notes = heapless::Vec::new();
    for octave in 0..SCALE_OCTAVES as u8 {
        for interval in mode.intervals() {
            // Capacity is exactly SCALE_OCTAVES * 7.
            let _ = notes.push(root + octave * 12 + interval);
        }
    }
    Scale { notes }
}
