//! Audio output trait and error types.

use std::sync::{Arc, Mutex};

use cw_engine::Renderer;
use thiserror::Error;

/// Renderer shared between an output and whoever reopens it.
///
/// Only the stream callback locks it while a stream is open, so the lock is
/// never contended on the real-time path.
pub type SharedRenderer = Arc<Mutex<Renderer>>;

/// Error type for audio operations.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No audio device available
    #[error("no audio device available")]
    NoDevice,
    /// Failed to initialize audio device
    #[error("device init error: {0}")]
    DeviceInit(String),
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Failed to start or pause the stream
    #[error("playback error: {0}")]
    Playback(String),
}

/// An output subsystem that periodically pulls blocks from a renderer.
pub trait AudioOutput {
    /// Rate of the currently open stream.
    fn sample_rate(&self) -> u32;

    /// Open a stream at `sample_rate` whose callback drives `renderer`.
    /// Any previously open stream is closed first.
    fn open(&mut self, sample_rate: u32, renderer: SharedRenderer) -> Result<(), AudioError>;

    /// Start invoking the callback.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Pause the callback; the stream stays open.
    fn stop(&mut self) -> Result<(), AudioError>;

    /// Tear the stream down. The callback does not run again until the next `open`.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}
