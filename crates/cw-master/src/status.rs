//! Status line and speed-control arithmetic for front ends.

use cw_ir::{Chord, PLAYBACK_RATE};

pub const SPEED_MIN: u32 = 10;
pub const SPEED_MAX: u32 = 200;

/// Output rate for a speed percentage.
pub fn rate_for_speed(percent: u32) -> u32 {
    let percent = percent.clamp(SPEED_MIN, SPEED_MAX);
    (PLAYBACK_RATE as u64 * percent as u64 / 100) as u32
}

/// Pitch shift in cents caused by playing at `percent` speed.
pub fn speed_cents(percent: u32) -> f64 {
    let ratio = percent.clamp(SPEED_MIN, SPEED_MAX) as f64 / 100.0;
    1200.0 * ratio.log2()
}

/// Tempo heard when `bpm` material plays at `percent` speed.
pub fn effective_bpm(bpm: u16, percent: u32) -> u32 {
    bpm as u32 * percent.clamp(SPEED_MIN, SPEED_MAX) / 100
}

/// E.g. `"Speed: 150% (180 BPM)  +702 cents"`.
pub fn speed_label(bpm: u16, percent: u32) -> String {
    format!(
        "Speed: {}% ({} BPM)  {:+.0} cents",
        percent,
        effective_bpm(bpm, percent),
        speed_cents(percent)
    )
}

/// Status shown while playback is underway.
///
/// Keeps the first segment of `base`, then appends progress and the chord
/// under the cursor. Past the last slot the whole line becomes `"Done"`.
pub fn live_status(
    base: &str,
    chords: &[Chord],
    samples_per_chord: usize,
    cursor: usize,
    buffer_length: usize,
) -> String {
    let head = base.split('|').next().unwrap_or("").trim();
    if buffer_length == 0 {
        return head.to_string();
    }

    let progress = cursor as f64 / buffer_length as f64 * 100.0;
    let index = if samples_per_chord > 0 {
        cursor / samples_per_chord
    } else {
        0
    };

    match chords.get(index) {
        Some(chord) => format!("{} | {:.0}% | {}", head, progress, chord),
        None => "Done".to_string(),
    }
}
