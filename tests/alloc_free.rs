//! Allocation-free callback tests.
//!
//! These tests verify that `Renderer::process()` does not allocate while
//! draining commands, rendering and publishing the snapshot. Buffers are
//! built outside the checked region; only the callback body runs inside it.
//!
//! Just run `cargo test`; no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use cw_engine::{engine_pair, EngineConfig, Renderer};
use cw_ir::{ChordParams, PlaybackBuffer, ScaleMode, WaveformChoice, MAX_BLOCK_FRAMES};
use cw_synth::ChordSequencer;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sequence(waveform: WaveformChoice, downsample_rate: Option<u32>) -> PlaybackBuffer {
    let params = ChordParams {
        bpm: 240,
        root_index: 5,
        mode: ScaleMode::Minor,
        waveform,
        downsample_rate,
        n_chords: 8,
    };
    let mut rng = StdRng::seed_from_u64(3);
    let (buffer, _) = ChordSequencer::default().generate(&params, &mut rng).into_parts();
    buffer
}

/// Run `blocks` callbacks of `block_size` frames, aborting on any heap allocation.
fn assert_process_alloc_free(renderer: &mut Renderer, block_size: usize, blocks: usize) {
    let mut out = vec![0.0f32; block_size];
    assert_no_alloc(|| {
        for _ in 0..blocks {
            renderer.process(&mut out);
        }
    });
}

#[test]
fn playback_to_exhaustion_alloc_free() {
    let (mut handle, mut renderer) = engine_pair(&EngineConfig::default());
    let buffer = sequence(WaveformChoice::RandomAll, None);
    let len = buffer.len();
    handle.play(buffer);

    // One block past the end exercises the zero-padded tail and the silent path.
    let blocks = len / 1024 + 3;
    assert_process_alloc_free(&mut renderer, 1024, blocks);
    assert_eq!(handle.get_state().1, len);
}

#[test]
fn buffer_swaps_alloc_free() {
    let (mut handle, mut renderer) = engine_pair(&EngineConfig::default());
    handle.play(sequence(WaveformChoice::Sine, None));
    assert_process_alloc_free(&mut renderer, 1024, 4);

    for rate in [8000, 4000, 22050] {
        handle.update_buffer(sequence(WaveformChoice::SquareSaw, Some(rate)));
        handle.set_volume(0.7);
        assert_process_alloc_free(&mut renderer, 1024, 4);
        handle.collect_garbage();
    }
    handle.stop();
    assert_process_alloc_free(&mut renderer, 1024, 2);
}

#[test]
fn largest_block_alloc_free() {
    let (mut handle, mut renderer) = engine_pair(&EngineConfig {
        block_size: MAX_BLOCK_FRAMES,
        ..EngineConfig::default()
    });
    handle.play(sequence(WaveformChoice::WhiteNoise, Some(11025)));
    handle.set_sample_rate(22050);
    assert_process_alloc_free(&mut renderer, MAX_BLOCK_FRAMES, 10);
}
