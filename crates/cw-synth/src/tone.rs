//! Stateless oscillators that render a whole waveform per call.
//!
//! Time samples are `t[i] = i * duration / count` for `count = floor(sample_rate * duration)`,
//! i.e. evenly spaced with no endpoint. No phase survives between calls.

use std::f64::consts::TAU;

use cw_ir::ToneKind;
use rand::Rng;

/// Per-voice amplitude used by the sequencer.
pub const DEFAULT_AMPLITUDE: f32 = 0.3;

/// Number of samples covering `duration` seconds, rounded down.
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    (sample_rate as f64 * duration).max(0.0) as usize
}

/// Render `duration` seconds of `kind` at `frequency` Hz.
///
/// `rng` is only consumed by [`ToneKind::WhiteNoise`], which ignores `frequency`.
pub fn generate_tone<R: Rng + ?Sized>(
    kind: ToneKind,
    frequency: f64,
    duration: f64,
    amplitude: f32,
    sample_rate: u32,
    rng: &mut R,
) -> Vec<f32> {
    let count = sample_count(duration, sample_rate);

    if kind == ToneKind::WhiteNoise {
        return (0..count)
            .map(|_| rng.random_range(-1.0f32..1.0) * amplitude)
            .collect();
    }

    let dt = if count == 0 { 0.0 } else { duration / count as f64 };
    let amplitude = amplitude as f64;
    (0..count)
        .map(|i| {
            let phase = TAU * frequency * (i as f64 * dt);
            (oscillate(kind, phase) * amplitude) as f32
        })
        .collect()
}

fn oscillate(kind: ToneKind, phase: f64) -> f64 {
    match kind {
        ToneKind::Sine => phase.sin(),
        ToneKind::Square => sign(phase.sin()),
        ToneKind::Triangle => sawtooth(phase, 0.5),
        ToneKind::Saw => sawtooth(phase, 1.0),
        ToneKind::WhiteNoise => 0.0,
    }
}

/// Sign with `sign(0) == 0`, unlike `f64::signum`.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Periodic sawtooth with period 2π.
///
/// Rises from -1 to 1 over the first `width` of the period, then falls back
/// to -1. `width = 1` is a rising ramp, `width = 0.5` a triangle.
pub fn sawtooth(x: f64, width: f64) -> f64 {
    let width = width.clamp(0.0, 1.0);
    let phase = x.rem_euclid(TAU);
    let rise = width * TAU;
    if phase < rise {
        -1.0 + 2.0 * phase / rise
    } else {
        1.0 - 2.0 * (phase - rise) / (TAU - rise)
    }
}
