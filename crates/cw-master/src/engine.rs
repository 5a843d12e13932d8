//! Engine facade: the control handle plus the output that drives the renderer.

use std::sync::{Arc, Mutex};

use cw_audio::{AudioError, AudioOutput, CpalOutput, SharedRenderer};
use cw_engine::{clamp_volume, engine_pair, EngineConfig, EngineHandle, PlayerState};
use cw_ir::PlaybackBuffer;

/// Streams buffers to an output device.
///
/// If the output cannot be opened or started the engine stays disabled:
/// requests are ignored, `is_playing` is false and the snapshot keeps its
/// initial value.
pub struct PlaybackEngine<O: AudioOutput = CpalOutput> {
    handle: EngineHandle,
    renderer: SharedRenderer,
    output: Option<O>,
    enabled: bool,
}

impl PlaybackEngine<CpalOutput> {
    /// Engine on the default output device.
    pub fn new(config: &EngineConfig) -> Self {
        match CpalOutput::new(config.block_size) {
            Ok(output) => Self::with_output(config, output),
            Err(e) => {
                log::error!("audio output unavailable: {}", e);
                Self::build(config, None)
            }
        }
    }
}

impl<O: AudioOutput> PlaybackEngine<O> {
    /// Open and start `output` at the configured rate.
    pub fn with_output(config: &EngineConfig, output: O) -> Self {
        Self::build(config, Some(output))
    }

    fn build(config: &EngineConfig, output: Option<O>) -> Self {
        let (handle, renderer) = engine_pair(config);
        let mut engine = Self {
            handle,
            renderer: Arc::new(Mutex::new(renderer)),
            output,
            enabled: false,
        };
        engine.enabled = match engine.start_output(config.sample_rate) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to start audio output: {}", e);
                false
            }
        };
        engine
    }

    fn start_output(&mut self, sample_rate: u32) -> Result<(), AudioError> {
        let output = self.output.as_mut().ok_or(AudioError::NoDevice)?;
        output.open(sample_rate, self.renderer.clone())?;
        output.start()
    }

    /// Start `buffer` from the top.
    pub fn play(&mut self, buffer: PlaybackBuffer) {
        if !self.enabled {
            log::debug!("output disabled, ignoring play");
            return;
        }
        self.handle.play(buffer);
    }

    /// Swap in `buffer`, keeping the cursor when it still fits.
    pub fn update_buffer(&mut self, buffer: PlaybackBuffer) {
        if !self.enabled {
            log::debug!("output disabled, ignoring buffer update");
            return;
        }
        self.handle.update_buffer(buffer);
    }

    pub fn stop(&mut self) {
        if self.enabled {
            self.handle.stop();
        }
    }

    /// Clamp to `[0, 1]`; applies from the next callback. Returns the clamped value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if self.enabled {
            self.handle.set_volume(volume)
        } else {
            clamp_volume(volume)
        }
    }

    /// Restart the output at `sample_rate`. The buffer is untouched, so
    /// this shifts pitch and speed together.
    pub fn update_rate(&mut self, sample_rate: u32) {
        if sample_rate == 0 {
            log::warn!("ignoring zero output rate");
            return;
        }
        if let Some(output) = self.output.as_mut() {
            if let Err(e) = output.stop() {
                log::warn!("failed to pause output: {}", e);
            }
            output.close();
        }
        self.handle.set_sample_rate(sample_rate);

        match self.start_output(sample_rate) {
            Ok(()) => {
                self.enabled = true;
                log::info!("output rate changed to {} Hz", sample_rate);
            }
            Err(e) => {
                self.enabled = false;
                log::error!("failed to restart output at {} Hz: {}", sample_rate, e);
            }
        }
    }

    /// `(current_chunk, cursor, buffer_length)` as of the last callback.
    pub fn get_state(&self) -> (Vec<f32>, usize, usize) {
        self.handle.get_state()
    }

    pub fn snapshot(&self) -> PlayerState {
        self.handle.snapshot()
    }

    pub fn is_playing(&self) -> bool {
        self.enabled && self.handle.is_playing()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn volume(&self) -> f32 {
        self.handle.volume()
    }

    pub fn sample_rate(&self) -> u32 {
        self.handle.sample_rate()
    }

    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    pub fn output_mut(&mut self) -> Option<&mut O> {
        self.output.as_mut()
    }
}

impl<O: AudioOutput> Drop for PlaybackEngine<O> {
    fn drop(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.close();
        }
    }
}
