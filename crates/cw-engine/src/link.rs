//! Control ↔ real-time handoff.
//!
//! Commands travel to the callback over a single-producer single-consumer
//! ring buffer and are applied before a block is rendered, so the callback
//! never sees a buffer paired with a cursor from another buffer. Replaced
//! buffers travel back on a second ring buffer and are freed on the control
//! side. The display snapshot is published with `try_lock`: if the control
//! side happens to hold the lock, the callback skips that block's update
//! rather than wait.

use std::sync::{Arc, Mutex, PoisonError};

use cw_ir::{PlaybackBuffer, DEFAULT_BLOCK_SIZE, PLAYBACK_RATE};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::command::Command;
use crate::player::{clamp_volume, Player, PlayerState};

/// Sizing for an engine pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: u32,
    pub block_size: usize,
    /// Commands that may be in flight before the control side starts dropping them.
    pub queue_capacity: usize,
    pub volume: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: PLAYBACK_RATE,
            block_size: DEFAULT_BLOCK_SIZE,
            queue_capacity: 64,
            volume: 0.5,
        }
    }
}

struct Shared {
    snapshot: Mutex<PlayerState>,
}

/// Build a connected control handle and real-time renderer.
pub fn engine_pair(config: &EngineConfig) -> (EngineHandle, Renderer) {
    let capacity = config.queue_capacity.max(1);
    let (cmd_tx, cmd_rx) = HeapRb::<Command>::new(capacity).split();
    // Every command retires at most one buffer, and the control side drains
    // before each send, so twice the command capacity never fills.
    let (retired_tx, retired_rx) = HeapRb::<PlaybackBuffer>::new(capacity * 2).split();

    let mut player = Player::new(config.sample_rate, config.block_size);
    player.set_volume(config.volume);

    let shared = Arc::new(Shared {
        snapshot: Mutex::new(player.state().clone()),
    });

    let handle = EngineHandle {
        commands: cmd_tx,
        retired: retired_rx,
        shared: shared.clone(),
        playing: false,
        volume: player.state().volume,
        sample_rate: config.sample_rate,
    };
    let renderer = Renderer {
        player,
        commands: cmd_rx,
        retired: retired_tx,
        shared,
    };
    (handle, renderer)
}

/// Real-time half: owned by the output callback.
pub struct Renderer {
    player: Player,
    commands: HeapCons<Command>,
    retired: HeapProd<PlaybackBuffer>,
    shared: Arc<Shared>,
}

impl Renderer {
    /// Service one pull callback: apply pending commands, render, publish.
    ///
    /// Never allocates, frees or blocks.
    pub fn process(&mut self, out: &mut [f32]) {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.process_inner(out));
        #[cfg(not(feature = "alloc_check"))]
        self.process_inner(out);
    }

    fn process_inner(&mut self, out: &mut [f32]) {
        while let Some(cmd) = self.commands.try_pop() {
            if let Some(old) = self.player.apply(cmd) {
                // Only fails if the control side has stopped draining.
                let _ = self.retired.try_push(old);
            }
        }

        self.player.render_block(out);

        if let Ok(mut snapshot) = self.shared.snapshot.try_lock() {
            snapshot.copy_from(self.player.state());
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}

/// Control half: queues requests for the renderer and reads snapshots.
pub struct EngineHandle {
    commands: HeapProd<Command>,
    retired: HeapCons<PlaybackBuffer>,
    shared: Arc<Shared>,
    playing: bool,
    volume: f32,
    sample_rate: u32,
}

impl EngineHandle {
    /// Play `buffer` from the top.
    pub fn play(&mut self, buffer: PlaybackBuffer) -> bool {
        let sent = self.send(Command::Play(buffer));
        self.playing |= sent;
        sent
    }

    /// Hot-swap the buffer, continuing mid-stream where possible.
    pub fn update_buffer(&mut self, buffer: PlaybackBuffer) -> bool {
        self.send(Command::UpdateBuffer(buffer))
    }

    pub fn stop(&mut self) -> bool {
        let sent = self.send(Command::Stop);
        if sent {
            self.playing = false;
        }
        sent
    }

    /// Clamp to `[0, 1]` and forward. Returns the clamped value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        let volume = clamp_volume(volume);
        if self.send(Command::SetVolume(volume)) {
            self.volume = volume;
        }
        volume
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        if self.send(Command::SetSampleRate(sample_rate)) {
            self.sample_rate = sample_rate;
        }
    }

    /// Whether playback has been requested and not stopped since.
    ///
    /// Tracks requests rather than the last published snapshot, so it is
    /// accurate even before the callback has picked the request up.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Copy of the state published by the most recent callback.
    pub fn snapshot(&self) -> PlayerState {
        self.shared
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `(current_chunk, cursor, buffer_length)` as of the most recent callback.
    pub fn get_state(&self) -> (Vec<f32>, usize, usize) {
        let snapshot = self.shared.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        (
            snapshot.current_chunk.to_vec(),
            snapshot.cursor,
            snapshot.buffer_length,
        )
    }

    /// Drop buffers the renderer has replaced. Returns how many were freed.
    pub fn collect_garbage(&mut self) -> usize {
        let mut freed = 0;
        while self.retired.try_pop().is_some() {
            freed += 1;
        }
        freed
    }

    fn send(&mut self, cmd: Command) -> bool {
        self.collect_garbage();
        match self.commands.try_push(cmd) {
            Ok(()) => true,
            Err(cmd) => {
                log::warn!("engine command queue full, dropping {}", cmd.name());
                false
            }
        }
    }
}
