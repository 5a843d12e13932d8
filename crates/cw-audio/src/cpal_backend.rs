//! CPAL-based audio output backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, Stream, StreamConfig};
use cw_ir::MAX_BLOCK_FRAMES;

use crate::traits::{AudioError, AudioOutput, SharedRenderer};

/// CPAL-based audio output.
///
/// The engine renders mono; each block is copied to every device channel.
pub struct CpalOutput {
    device: Device,
    channels: u16,
    block_size: usize,
    sample_rate: u32,
    stream: Option<Stream>,
    running: Arc<AtomicBool>,
}

impl CpalOutput {
    /// Create a new CPAL output on the default device.
    pub fn new(block_size: usize) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;

        if let Ok(name) = device.name() {
            log::info!(
                "output device: {} ({} ch, default {} Hz)",
                name,
                config.channels(),
                config.sample_rate().0
            );
        }

        Ok(Self {
            device,
            channels: config.channels().max(1),
            block_size: block_size.clamp(1, MAX_BLOCK_FRAMES),
            sample_rate: config.sample_rate().0,
            stream: None,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    fn build_stream(
        &self,
        config: &StreamConfig,
        renderer: SharedRenderer,
    ) -> Result<Stream, cpal::BuildStreamError> {
        let running = self.running.clone();
        let channels = self.channels as usize;
        let block = self.block_size;
        let mut scratch = vec![0.0f32; block];

        self.device.build_output_stream(
            config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if !running.load(Ordering::Relaxed) {
                    data.fill(0.0);
                    return;
                }
                let Ok(mut renderer) = renderer.try_lock() else {
                    data.fill(0.0);
                    return;
                };

                // Split the device buffer into engine-sized mono blocks
                for frames in data.chunks_mut(block * channels) {
                    let mono = &mut scratch[..frames.len() / channels];
                    renderer.process(mono);
                    for (frame, &sample) in frames.chunks_mut(channels).zip(mono.iter()) {
                        frame.fill(sample);
                    }
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        )
    }
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open(&mut self, sample_rate: u32, renderer: SharedRenderer) -> Result<(), AudioError> {
        self.close();

        let mut config = StreamConfig {
            channels: self.channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: BufferSize::Fixed(self.block_size as u32),
        };

        let stream = match self.build_stream(&config, renderer.clone()) {
            Ok(stream) => stream,
            Err(e) => {
                log::debug!("fixed block size rejected ({}), using device default", e);
                config.buffer_size = BufferSize::Default;
                self.build_stream(&config, renderer)
                    .map_err(|e| AudioError::StreamCreate(e.to_string()))?
            }
        };

        self.stream = Some(stream);
        self.sample_rate = sample_rate;
        Ok(())
    }

    fn start(&mut self) -> Result<(), AudioError> {
        self.running.store(true, Ordering::Relaxed);
        if let Some(ref stream) = self.stream {
            stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running.store(false, Ordering::Relaxed);
        if let Some(ref stream) = self.stream {
            stream.pause().map_err(|e| AudioError::Playback(e.to_string()))?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        // Dropping the stream joins the callback and releases its renderer clone.
        self.stream = None;
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}
