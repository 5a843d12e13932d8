//! Chord metadata produced alongside rendered audio.

use core::fmt;

use crate::note::{midi_to_frequency, nearest_note_name, note_name, NoteName};

/// Triad quality, determined by the semitone distances of third and fifth from the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Unknown,
    /// Placeholder entry for audio loaded from a file.
    File,
}

impl ChordQuality {
    /// Short label for display.
    pub const fn label(self) -> &'static str {
        match self {
            ChordQuality::Major => "Maj",
            ChordQuality::Minor => "Min",
            ChordQuality::Diminished => "Dim",
            ChordQuality::Augmented => "Aug",
            ChordQuality::Unknown => "???",
            ChordQuality::File => "File",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a triad from its MIDI notes.
pub fn classify_quality(root_midi: u8, third_midi: u8, fifth_midi: u8) -> ChordQuality {
    let third = third_midi as i16 - root_midi as i16;
    let fifth = fifth_midi as i16 - root_midi as i16;
    match (third, fifth) {
        (4, 7) => ChordQuality::Major,
        (3, 7) => ChordQuality::Minor,
        (3, 6) => ChordQuality::Diminished,
        (4, 8) => ChordQuality::Augmented,
        _ => ChordQuality::Unknown,
    }
}

/// One sequencer slot: three voice frequencies plus display metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Chord {
    pub root_frequency: f64,
    pub third_frequency: f64,
    pub fifth_frequency: f64,
    pub quality: ChordQuality,
    /// Name of the root note (or of the file, for file playback).
    pub note_name: NoteName,
}

impl Chord {
    /// Build a chord from the MIDI notes of its three voices.
    pub fn from_midi(root: u8, third: u8, fifth: u8) -> Self {
        let root_frequency = midi_to_frequency(root);
        Self {
            root_frequency,
            third_frequency: midi_to_frequency(third),
            fifth_frequency: midi_to_frequency(fifth),
            quality: classify_quality(root, third, fifth),
            note_name: nearest_note_name(root_frequency),
        }
    }

    /// Single-entry metadata tagging a buffer as file audio.
    pub fn file(name: &str) -> Self {
        Self {
            root_frequency: 0.0,
            third_frequency: 0.0,
            fifth_frequency: 0.0,
            quality: ChordQuality::File,
            note_name: note_name(name),
        }
    }

    /// Nearest note names of root, third and fifth.
    pub fn voice_names(&self) -> [NoteName; 3] {
        [
            nearest_note_name(self.root_frequency),
            nearest_note_name(self.third_frequency),
            nearest_note_name(self.fifth_frequency),
        ]
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quality == ChordQuality::File {
            return write!(f, "{} {}", self.note_name, self.quality);
        }
        let [root, third, fifth] = self.voice_names();
        write!(
            f,
            "{} {} ({},{},{})",
            self.note_name, self.quality, root, third, fifth
        )
    }
}
