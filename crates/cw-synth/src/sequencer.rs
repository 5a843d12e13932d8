//! Random triad sequences rendered to a single contiguous buffer.

use cw_ir::{build_scale, Chord, ChordParams, PlaybackBuffer, ToneKind, PLAYBACK_RATE};
use rand::Rng;

use crate::downsample::stretch_to_rate;
use crate::tone::{generate_tone, sample_count, DEFAULT_AMPLITUDE};

/// Gain applied to the three-voice sum to keep headroom.
pub const MIX_GAIN: f32 = 0.3;

/// Maximum length of the linear fade at each end of a chord.
pub const FADE_SAMPLES: usize = 100;

/// Rendered chords plus their metadata, in playback order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    pub samples: Vec<f32>,
    pub chords: Vec<Chord>,
    /// Full-rate length of each chord slot.
    pub samples_per_chord: usize,
}

impl Sequence {
    pub fn into_parts(self) -> (PlaybackBuffer, Vec<Chord>) {
        (PlaybackBuffer::new(self.samples), self.chords)
    }
}

/// Builds chord sequences from a key, mode and waveform pool.
#[derive(Clone, Copy, Debug)]
pub struct ChordSequencer {
    sample_rate: u32,
    amplitude: f32,
}

impl Default for ChordSequencer {
    fn default() -> Self {
        Self::new(PLAYBACK_RATE)
    }
}

impl ChordSequencer {
    /// Sequencer rendering at the engine's native `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    /// Render `params.n_chords` random triads from the key's scale.
    ///
    /// With a downsample rate, each chord is synthesized at that rate and
    /// stretched back to the native rate, which is what makes the lo-fi sound.
    pub fn generate<R: Rng + ?Sized>(&self, params: &ChordParams, rng: &mut R) -> Sequence {
        let params = params.normalized();
        let duration = params.chord_duration();
        let scale = build_scale(params.root_index, params.mode);
        let degrees = scale.root_degrees();
        let pool = params.waveform.pool();
        let generation_rate = params.downsample_rate.unwrap_or(self.sample_rate);
        let samples_per_chord = sample_count(duration, self.sample_rate);

        log::info!(
            "Generating {} chords ({}) in {} at {} BPM",
            params.n_chords,
            params.waveform,
            params.key_name(),
            params.bpm
        );

        let mut samples = Vec::with_capacity(samples_per_chord * params.n_chords);
        let mut chords = Vec::with_capacity(params.n_chords);

        for _ in 0..params.n_chords {
            let degree = rng.random_range(degrees.clone());
            let Some([root, third, fifth]) = scale.triad(degree) else {
                continue;
            };
            let chord = Chord::from_midi(root, third, fifth);

            let mut mix = vec![0.0f32; sample_count(duration, generation_rate)];
            for frequency in [chord.root_frequency, chord.third_frequency, chord.fifth_frequency] {
                let kind = pick(pool, rng);
                let voice =
                    generate_tone(kind, frequency, duration, self.amplitude, generation_rate, rng);
                for (out, s) in mix.iter_mut().zip(voice) {
                    *out += s;
                }
            }
            for s in &mut mix {
                *s *= MIX_GAIN;
            }
            apply_fades(&mut mix);

            match params.downsample_rate {
                Some(rate) => samples.extend(stretch_to_rate(&mix, duration, self.sample_rate, rate)),
                None => samples.extend(mix),
            }
            chords.push(chord);
        }

        Sequence {
            samples,
            chords,
            samples_per_chord,
        }
    }
}

fn pick<R: Rng + ?Sized>(pool: &[ToneKind], rng: &mut R) -> ToneKind {
    match pool {
        [only] => *only,
        _ => pool[rng.random_range(0..pool.len())],
    }
}

/// Linear fade-in and fade-out over `min(FADE_SAMPLES, len / 2)` samples.
fn apply_fades(chord: &mut [f32]) {
    let fade = FADE_SAMPLES.min(chord.len() / 2);
    if fade == 0 {
        return;
    }
    let len = chord.len();
    for i in 0..fade {
        let gain = ramp(i, fade);
        chord[i] *= gain;
        chord[len - 1 - i] *= gain;
    }
}

/// `i`-th point of an inclusive 0..=1 ramp with `n` points.
fn ramp(i: usize, n: usize) -> f32 {
    if n <= 1 {
        0.0
    } else {
        i as f32 / (n - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_ir::{ChordQuality, ScaleMode, WaveformChoice};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(n_chords: usize) -> ChordParams {
        ChordParams {
            n_chords,
            waveform: WaveformChoice::Sine,
            ..ChordParams::default()
        }
    }

    /// The three-voice sum at mix gain, before fades.
    fn unfaded_mix(chord: &Chord, kinds: [ToneKind; 3], duration: f64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(0);
        let frequencies = [chord.root_frequency, chord.third_frequency, chord.fifth_frequency];
        let mut mix = vec![0.0f32; sample_count(duration, PLAYBACK_RATE)];
        for (kind, frequency) in kinds.into_iter().zip(frequencies) {
            let voice =
                generate_tone(kind, frequency, duration, DEFAULT_AMPLITUDE, PLAYBACK_RATE, &mut rng);
            for (out, s) in mix.iter_mut().zip(voice) {
                *out += s;
            }
        }
        for s in &mut mix {
            *s *= MIX_GAIN;
        }
        mix
    }

    #[test]
    fn one_chord_at_120_bpm_is_half_a_second() {
        let seq = ChordSequencer::default().generate(&params(1), &mut StdRng::seed_from_u64(1));
        assert_eq!(seq.chords.len(), 1);
        assert_eq!(seq.samples.len(), 22050);
        assert_eq!(seq.samples_per_chord, 22050);
    }

    #[test]
    fn chords_are_concatenated_in_order() {
        let seq = ChordSequencer::default().generate(&params(4), &mut StdRng::seed_from_u64(2));
        assert_eq!(seq.chords.len(), 4);
        assert_eq!(seq.samples.len(), 4 * seq.samples_per_chord);
    }

    #[test]
    fn zero_chords_is_empty() {
        let seq = ChordSequencer::default().generate(&params(0), &mut StdRng::seed_from_u64(3));
        assert!(seq.samples.is_empty());
        assert!(seq.chords.is_empty());
    }

    #[test]
    fn same_seed_same_sequence() {
        let p = ChordParams {
            n_chords: 3,
            waveform: WaveformChoice::RandomAll,
            ..ChordParams::default()
        };
        let a = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(9));
        let b = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn chord_edges_fade_to_silence() {
        let seq = ChordSequencer::default().generate(&params(2), &mut StdRng::seed_from_u64(4));
        let n = seq.samples_per_chord;
        assert_eq!(seq.samples[0], 0.0);
        assert_eq!(seq.samples[n - 1], 0.0);
        assert_eq!(seq.samples[n], 0.0);
        assert_eq!(seq.samples[2 * n - 1], 0.0);
    }

    #[test]
    fn mix_stays_within_unit_range() {
        let p = ChordParams {
            n_chords: 8,
            waveform: WaveformChoice::SquareSaw,
            ..ChordParams::default()
        };
        let seq = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(5));
        // three voices at 0.3, mixed at 0.3
        assert!(seq.samples.iter().all(|s| s.abs() <= 0.27 + 1e-6));
    }

    #[test]
    fn major_key_yields_diatonic_qualities() {
        let p = ChordParams {
            n_chords: 64,
            mode: ScaleMode::Major,
            ..params(64)
        };
        let seq = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(6));
        assert!(seq.chords.iter().all(|c| matches!(
            c.quality,
            ChordQuality::Major | ChordQuality::Minor | ChordQuality::Diminished
        )));
    }

    #[test]
    fn roots_stay_in_the_scale() {
        let p = ChordParams { root_index: 2, ..params(32) };
        let seq = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(8));
        let scale = build_scale(2, ScaleMode::Major);
        let lowest = cw_ir::midi_to_frequency(scale.notes()[0]);
        let highest_root = cw_ir::midi_to_frequency(scale.notes()[23]);
        for chord in &seq.chords {
            assert!(chord.root_frequency >= lowest && chord.root_frequency <= highest_root);
            assert!(chord.third_frequency > chord.root_frequency);
            assert!(chord.fifth_frequency > chord.third_frequency);
        }
    }

    #[test]
    fn downsampled_chords_keep_full_rate_length() {
        let p = ChordParams {
            downsample_rate: Some(8000),
            ..params(2)
        };
        let seq = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(10));
        assert_eq!(seq.samples.len(), 2 * 22050);
    }

    #[test]
    fn downsampled_chords_hold_samples() {
        let p = ChordParams {
            downsample_rate: Some(11025),
            ..params(1)
        };
        let seq = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(11));
        // step = 4: samples come in runs of four
        for run in seq.samples.chunks(4) {
            assert!(run.iter().all(|&s| s == run[0]));
        }
    }

    #[test]
    fn voice_kinds_are_drawn_per_voice() {
        let p = ChordParams {
            n_chords: 12,
            waveform: WaveformChoice::SineTriangle,
            ..ChordParams::default()
        };
        let seq = ChordSequencer::default().generate(&p, &mut StdRng::seed_from_u64(12));
        let n = seq.samples_per_chord;
        let pool = [ToneKind::Sine, ToneKind::Triangle];

        let mut mixed = 0;
        for (slot, chord) in seq.chords.iter().enumerate() {
            let rendered = &seq.samples[slot * n..(slot + 1) * n];
            let kinds = (0..8usize)
                .map(|bits| [pool[bits & 1], pool[(bits >> 1) & 1], pool[(bits >> 2) & 1]])
                .find(|&kinds| {
                    let mut mix = unfaded_mix(chord, kinds, p.chord_duration());
                    apply_fades(&mut mix);
                    mix.as_slice() == rendered
                })
                .expect("chord matches one voice assignment");
            if kinds.iter().any(|&k| k != kinds[0]) {
                mixed += 1;
            }
        }
        assert!(mixed > 0);
    }

    #[test]
    fn fade_is_capped_at_fade_samples() {
        let seq = ChordSequencer::default().generate(&params(1), &mut StdRng::seed_from_u64(13));
        let len = seq.samples.len();
        assert_eq!(len, 22050);
        let unfaded = unfaded_mix(&seq.chords[0], [ToneKind::Sine; 3], 0.5);

        // last ramp point has gain 1.0
        assert_eq!(seq.samples[FADE_SAMPLES - 1], unfaded[FADE_SAMPLES - 1]);
        assert_eq!(seq.samples[len - FADE_SAMPLES], unfaded[len - FADE_SAMPLES]);
        assert_eq!(
            &seq.samples[FADE_SAMPLES..len - FADE_SAMPLES],
            &unfaded[FADE_SAMPLES..len - FADE_SAMPLES]
        );
        let expected = unfaded[50] * (50.0 / 99.0);
        assert!((seq.samples[50] - expected).abs() < 1e-7);
    }

    #[test]
    fn fades_use_inclusive_ramp() {
        let mut chord = vec![1.0f32; 10];
        apply_fades(&mut chord);
        // fade = 5 samples: 0, .25, .5, .75, 1
        assert_eq!(&chord[..5], &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(&chord[5..], &[1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn single_sample_chord_is_untouched() {
        let mut chord = vec![1.0f32];
        apply_fades(&mut chord);
        assert_eq!(chord, [1.0]);
    }
}
