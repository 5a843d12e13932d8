use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cw_ir::{ChordParams, WaveformChoice};
use cw_synth::{block_downsample, ChordSequencer};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let sequencer = ChordSequencer::default();
    let clean = ChordParams {
        n_chords: 32,
        waveform: WaveformChoice::RandomAll,
        ..ChordParams::default()
    };
    let lofi = ChordParams {
        downsample_rate: Some(4000),
        ..clean
    };

    c.bench_function("generate_32_clean", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| sequencer.generate(black_box(&clean), &mut rng))
    });
    c.bench_function("generate_32_lofi", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| sequencer.generate(black_box(&lofi), &mut rng))
    });
}

fn bench_downsample(c: &mut Criterion) {
    let buffer: Vec<f32> = (0..44100 * 10).map(|i| (i as f32 * 0.01).sin()).collect();
    c.bench_function("block_downsample_10s", |b| {
        b.iter(|| block_downsample(black_box(buffer.clone()), Some(8000), 44100))
    });
}

criterion_group!(benches, bench_generate, bench_downsample);
criterion_main!(benches);
