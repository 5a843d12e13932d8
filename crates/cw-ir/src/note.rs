//! MIDI note / frequency conversion and note naming.
//!
//! Equal temperament with A4 = MIDI 69 = 440 Hz.

use arrayvec::ArrayString;
use core::fmt::Write;

use crate::params::ParamError;

/// A short display name: a note like `C#4`, or a truncated file name.
pub type NoteName = ArrayString<32>;

/// Pitch-class names, indexed by `midi % 12`.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Returned by [`nearest_note_name`] when the frequency has no pitch.
pub const UNKNOWN_NOTE: &str = "unknown";

const A4_MIDI: f64 = 69.0;
const A4_FREQ: f64 = 440.0;

/// Convert a MIDI note number to a frequency in Hz.
pub fn midi_to_frequency(midi: u8) -> f64 {
    A4_FREQ * libm::pow(2.0, (midi as f64 - A4_MIDI) / 12.0)
}

/// Name the note closest to `frequency`, e.g. `440.0` → `"A4"`.
///
/// Zero, negative and non-finite frequencies yield [`UNKNOWN_NOTE`].
pub fn nearest_note_name(frequency: f64) -> NoteName {
    if !(frequency.is_finite() && frequency > 0.0) {
        return note_name(UNKNOWN_NOTE);
    }
    let midi = libm::round(A4_MIDI + 12.0 * libm::log2(frequency / A4_FREQ)) as i64;
    let octave = midi.div_euclid(12) - 1;
    let pitch = midi.rem_euclid(12) as usize;

    let mut name = NoteName::new();
    // "G#-12" is the longest a finite f64 can produce; it always fits.
    let _ = write!(name, "{}{}", NOTE_NAMES[pitch], octave);
    name
}

/// Build a [`NoteName`] from arbitrary text, truncating on a char boundary.
pub fn note_name(text: &str) -> NoteName {
    let mut name = NoteName::new();
    for ch in text.chars() {
        if name.try_push(ch).is_err() {
            break;
        }
    }
    name
}

/// Parse a key name (`"C"`, `"f#"`, `"Bb"`) into a root index 0-11.
pub fn root_index_from_name(name: &str) -> Result<u8, ParamError> {
    let trimmed = name.trim();
    if let Some(i) = NOTE_NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(trimmed))
    {
        return Ok(i as u8);
    }

    // Flats map onto the sharp below.
    let mut chars = trimmed.chars();
    if let (Some(letter), Some('b'), None) = (chars.next(), chars.next(), chars.next()) {
        let upper = letter.to_ascii_uppercase();
        if let Some(i) = NOTE_NAMES
            .iter()
            .position(|n| n.len() == 1 && n.starts_with(upper))
        {
            return Ok(((i + 11) % 12) as u8);
        }
    }

    Err(ParamError::invalid("key", trimmed))
}
