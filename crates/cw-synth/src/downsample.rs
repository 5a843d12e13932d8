//! Nearest-neighbor sample-rate reduction.
//!
//! No anti-aliasing filter is applied: each retained sample is held for a
//! whole step, and the resulting stair-step aliasing is the effect.

/// Hold every `original_rate / target_rate`-th sample across its step.
///
/// The output has the same length as the input. Returns `buffer` untouched
/// when `target_rate` is `None`, zero, or not below `original_rate`.
pub fn block_downsample(buffer: Vec<f32>, target_rate: Option<u32>, original_rate: u32) -> Vec<f32> {
    let target = match target_rate {
        Some(rate) if rate > 0 && rate < original_rate => rate,
        _ => return buffer,
    };
    if buffer.is_empty() {
        return buffer;
    }

    let step = original_rate as f64 / target as f64;
    let last = buffer.len() - 1;
    (0..buffer.len())
        .map(|i| {
            let held = ((i as f64 / step).floor() * step) as usize;
            buffer[held.min(last)]
        })
        .collect()
}

/// Stretch audio rendered at `reduced_rate` out to `duration` seconds at `full_rate`.
///
/// Output sample `i` repeats input sample `floor(i / step)` with
/// `step = full_rate / reduced_rate`, clamped to the last input sample.
pub fn stretch_to_rate(chord: &[f32], duration: f64, full_rate: u32, reduced_rate: u32) -> Vec<f32> {
    let target_len = (duration * full_rate as f64).max(0.0) as usize;
    if chord.is_empty() || reduced_rate == 0 {
        return vec![0.0; target_len];
    }

    let step = full_rate as f64 / reduced_rate as f64;
    let last = chord.len() - 1;
    (0..target_len)
        .map(|i| chord[((i as f64 / step) as usize).min(last)])
        .collect()
}
