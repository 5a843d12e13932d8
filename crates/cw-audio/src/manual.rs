//! Device-less output driven by its owner.
//!
//! Stands in for a sound card in headless runs and tests: every call to
//! [`ManualOutput::pull`] is one callback invocation.

use crate::traits::{AudioError, AudioOutput, SharedRenderer};

pub struct ManualOutput {
    block_size: usize,
    sample_rate: u32,
    renderer: Option<SharedRenderer>,
    running: bool,
    fail_open: bool,
    callbacks: u64,
}

impl ManualOutput {
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            sample_rate: 0,
            renderer: None,
            running: false,
            fail_open: false,
            callbacks: 0,
        }
    }

    /// An output whose `open` always fails, like a missing device.
    pub fn failing(block_size: usize) -> Self {
        Self {
            fail_open: true,
            ..Self::new(block_size)
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of callbacks that reached the renderer.
    pub fn callbacks(&self) -> u64 {
        self.callbacks
    }

    /// Invoke the callback once for `out.len()` frames.
    ///
    /// Returns false and writes silence when the stream is closed or stopped.
    pub fn pull_into(&mut self, out: &mut [f32]) -> bool {
        let renderer = match (&self.renderer, self.running) {
            (Some(renderer), true) => renderer,
            _ => {
                out.fill(0.0);
                return false;
            }
        };
        let Ok(mut renderer) = renderer.try_lock() else {
            out.fill(0.0);
            return false;
        };
        renderer.process(out);
        self.callbacks += 1;
        true
    }

    /// Invoke the callback once for a default-sized block.
    pub fn pull(&mut self) -> Vec<f32> {
        let mut out = vec![0.0; self.block_size];
        self.pull_into(&mut out);
        out
    }

    /// Pull `blocks` default-sized blocks back to back.
    pub fn pull_blocks(&mut self, blocks: usize) -> Vec<f32> {
        let mut out = vec![0.0; self.block_size * blocks];
        for block in out.chunks_mut(self.block_size) {
            self.pull_into(block);
        }
        out
    }
}

impl AudioOutput for ManualOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open(&mut self, sample_rate: u32, renderer: SharedRenderer) -> Result<(), AudioError> {
        self.close();
        if self.fail_open {
            return Err(AudioError::NoDevice);
        }
        self.renderer = Some(renderer);
        self.sample_rate = sample_rate;
        Ok(())
    }

    fn start(&mut self) -> Result<(), AudioError> {
        if self.renderer.is_none() {
            return Err(AudioError::Playback("stream not open".into()));
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running = false;
        Ok(())
    }

    fn close(&mut self) {
        self.running = false;
        self.renderer = None;
    }

    fn is_open(&self) -> bool {
        self.renderer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_engine::{engine_pair, EngineConfig};
    use cw_ir::PlaybackBuffer;
    use std::sync::{Arc, Mutex};

    fn open_output() -> (cw_engine::EngineHandle, ManualOutput) {
        let (handle, renderer) = engine_pair(&EngineConfig {
            block_size: 4,
            volume: 1.0,
            ..EngineConfig::default()
        });
        let mut output = ManualOutput::new(4);
        output.open(44100, Arc::new(Mutex::new(renderer))).unwrap();
        output.start().unwrap();
        (handle, output)
    }

    #[test]
    fn pull_drives_the_renderer() {
        let (mut handle, mut output) = open_output();
        handle.play(PlaybackBuffer::new(vec![0.5; 6]));
        assert_eq!(output.pull(), vec![0.5; 4]);
        assert_eq!(output.pull(), vec![0.5, 0.5, 0.0, 0.0]);
        assert_eq!(output.callbacks(), 2);
        assert_eq!(handle.get_state().1, 6);
    }

    #[test]
    fn stopped_output_is_silent_and_skips_callbacks() {
        let (mut handle, mut output) = open_output();
        handle.play(PlaybackBuffer::new(vec![0.5; 8]));
        output.stop().unwrap();
        assert_eq!(output.pull(), vec![0.0; 4]);
        assert_eq!(output.callbacks(), 0);
    }

    #[test]
    fn close_releases_renderer() {
        let (_handle, mut output) = open_output();
        output.close();
        assert!(!output.is_open());
        assert!(output.start().is_err());
    }

    #[test]
    fn failing_output_never_opens() {
        let (_handle, renderer) = engine_pair(&EngineConfig::default());
        let mut output = ManualOutput::failing(4);
        assert!(matches!(
            output.open(44100, Arc::new(Mutex::new(renderer))),
            Err(AudioError::NoDevice)
        ));
        assert!(!output.is_open());
    }

    #[test]
    fn pull_blocks_concatenates() {
        let (mut handle, mut output) = open_output();
        handle.play(PlaybackBuffer::new(vec![0.25; 10]));
        let out = output.pull_blocks(3);
        assert_eq!(out.len(), 12);
        assert!(out[..10].iter().all(|&s| s == 0.25));
        assert_eq!(&out[10..], &[0.0, 0.0]);
    }
}
