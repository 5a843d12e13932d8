//! Control messages for the real-time side.

use cw_ir::PlaybackBuffer;

/// A request from the control context, applied at the start of the next callback.
#[derive(Debug)]
pub enum Command {
    /// Adopt a buffer and play it from the top.
    Play(PlaybackBuffer),
    /// Swap the buffer, keeping the cursor if it still fits.
    UpdateBuffer(PlaybackBuffer),
    /// Emit silence; the cursor stays where it is.
    Stop,
    /// Output gain, already clamped to `[0, 1]`.
    SetVolume(f32),
    /// Record the rate the output stream now runs at.
    SetSampleRate(u32),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Play(_) => "play",
            Command::UpdateBuffer(_) => "update_buffer",
            Command::Stop => "stop",
            Command::SetVolume(_) => "set_volume",
            Command::SetSampleRate(_) => "set_sample_rate",
        }
    }
}
