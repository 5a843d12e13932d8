//! Playback engine for chordwave.
//!
//! [`Player`] is the cursor-driven state machine serviced by the output
//! callback. [`engine_pair`] splits it into a control-side [`EngineHandle`]
//! and a real-time [`Renderer`] connected by lock-free queues, so buffer
//! swaps land atomically between two callbacks.

mod command;
mod link;
mod player;

pub use command::Command;
pub use link::{engine_pair, EngineConfig, EngineHandle, Renderer};
pub use player::{clamp_volume, PlaybackStatus, Player, PlayerState, ScopeChunk};
