//! Cursor-driven playback over a single buffer.

use core::mem;

use cw_ir::{PlaybackBuffer, MAX_BLOCK_FRAMES};

use crate::command::Command;

/// The most recently emitted block, kept inline so recording it never allocates.
pub type ScopeChunk = heapless::Vec<f32, MAX_BLOCK_FRAMES>;

/// Where the player is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    /// Playing, but the cursor has reached the end of the buffer.
    Exhausted,
}

/// Observable playback state.
///
/// Invariant: `cursor <= buffer_length`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub cursor: usize,
    pub buffer_length: usize,
    pub volume: f32,
    pub sample_rate: u32,
    pub is_playing: bool,
    /// Samples written by the last callback, volume applied.
    /// As long as the last block, up to [`MAX_BLOCK_FRAMES`].
    pub current_chunk: ScopeChunk,
}

impl PlayerState {
    pub fn new(sample_rate: u32, block_size: usize) -> Self {
        let mut current_chunk = ScopeChunk::new();
        let _ = current_chunk.resize(block_size.min(MAX_BLOCK_FRAMES), 0.0);
        Self {
            cursor: 0,
            buffer_length: 0,
            volume: 0.5,
            sample_rate,
            is_playing: false,
            current_chunk,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        if !self.is_playing {
            PlaybackStatus::Stopped
        } else if self.cursor >= self.buffer_length {
            PlaybackStatus::Exhausted
        } else {
            PlaybackStatus::Playing
        }
    }

    /// Copy `other` into `self` without allocating.
    pub fn copy_from(&mut self, other: &PlayerState) {
        self.cursor = other.cursor;
        self.buffer_length = other.buffer_length;
        self.volume = other.volume;
        self.sample_rate = other.sample_rate;
        self.is_playing = other.is_playing;
        self.current_chunk.clear();
        let _ = self.current_chunk.extend_from_slice(&other.current_chunk);
    }

    fn record(&mut self, block: &[f32]) {
        self.current_chunk.clear();
        let n = block.len().min(MAX_BLOCK_FRAMES);
        let _ = self.current_chunk.extend_from_slice(&block[..n]);
    }
}

/// Owns the active buffer and its cursor.
pub struct Player {
    buffer: PlaybackBuffer,
    state: PlayerState,
}

impl Player {
    pub fn new(sample_rate: u32, block_size: usize) -> Self {
        Self {
            buffer: PlaybackBuffer::default(),
            state: PlayerState::new(sample_rate, block_size),
        }
    }

    /// Adopt `buffer` and start from the top. Returns the replaced buffer.
    pub fn play(&mut self, buffer: PlaybackBuffer) -> PlaybackBuffer {
        self.state.buffer_length = buffer.len();
        self.state.cursor = 0;
        self.state.is_playing = true;
        mem::replace(&mut self.buffer, buffer)
    }

    /// Swap in `buffer` without restarting, unless the cursor would fall past its end.
    /// Returns the replaced buffer.
    pub fn update_buffer(&mut self, buffer: PlaybackBuffer) -> PlaybackBuffer {
        if self.state.cursor >= buffer.len() {
            self.state.cursor = 0;
        }
        self.state.buffer_length = buffer.len();
        mem::replace(&mut self.buffer, buffer)
    }

    pub fn stop(&mut self) {
        self.state.is_playing = false;
    }

    /// See [`clamp_volume`].
    pub fn set_volume(&mut self, volume: f32) {
        self.state.volume = clamp_volume(volume);
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.state.sample_rate = sample_rate;
    }

    /// Apply a control command. Returns a buffer the caller must dispose of.
    pub fn apply(&mut self, cmd: Command) -> Option<PlaybackBuffer> {
        match cmd {
            Command::Play(buffer) => Some(self.play(buffer)),
            Command::UpdateBuffer(buffer) => Some(self.update_buffer(buffer)),
            Command::Stop => {
                self.stop();
                None
            }
            Command::SetVolume(volume) => {
                self.set_volume(volume);
                None
            }
            Command::SetSampleRate(rate) => {
                self.set_sample_rate(rate);
                None
            }
        }
    }

    /// Fill one output block. This is the body of the pull callback.
    ///
    /// Copies `buffer[cursor..cursor + out.len()]` scaled by the volume,
    /// zero-pads past the end of the buffer and pins the cursor there.
    /// Writes silence when stopped or exhausted.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let state = &mut self.state;

        if !state.is_playing || state.cursor >= state.buffer_length {
            out.fill(0.0);
            state.record(out);
            return;
        }

        let start = state.cursor;
        let end = (start + out.len()).min(state.buffer_length);
        let written = end - start;
        let volume = state.volume;

        for (dst, &src) in out[..written]
            .iter_mut()
            .zip(&self.buffer.samples()[start..end])
        {
            *dst = src * volume;
        }
        out[written..].fill(0.0);

        state.cursor = end;
        state.record(out);
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// `(current_chunk, cursor, buffer_length)` for display.
    pub fn get_state(&self) -> (&[f32], usize, usize) {
        (
            &self.state.current_chunk,
            self.state.cursor,
            self.state.buffer_length,
        )
    }
}

/// Clamp to `[0, 1]`; NaN mutes.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
