//! Turns front-end requests into buffers and hands them to the engine.

use cw_audio::{AudioOutput, CpalOutput};
use cw_formats::{AssetLibrary, FormatError, MISSING_FILE_SAMPLES};
use cw_ir::{Chord, ChordParams, PlaybackBuffer, PlaybackRequest, SourceMode, PLAYBACK_RATE};
use cw_synth::{block_downsample, ChordSequencer};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::PlayerConfig;
use crate::engine::PlaybackEngine;
use crate::status::{live_status, rate_for_speed};

/// Owns the engine and everything needed to fill it.
pub struct PlaybackController<O: AudioOutput = CpalOutput> {
    engine: PlaybackEngine<O>,
    sequencer: ChordSequencer,
    assets: AssetLibrary,
    rng: StdRng,
    current_filename: Option<String>,
    chords: Vec<Chord>,
    samples_per_chord: usize,
    status: String,
}

impl PlaybackController<CpalOutput> {
    /// Controller playing through the default output device.
    pub fn new(config: &PlayerConfig) -> Self {
        let engine = PlaybackEngine::new(&config.engine_config());
        Self::from_engine(config, engine)
    }
}

impl<O: AudioOutput> PlaybackController<O> {
    pub fn with_output(config: &PlayerConfig, output: O) -> Self {
        let engine = PlaybackEngine::with_output(&config.engine_config(), output);
        Self::from_engine(config, engine)
    }

    fn from_engine(config: &PlayerConfig, engine: PlaybackEngine<O>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            engine,
            sequencer: ChordSequencer::new(PLAYBACK_RATE),
            assets: config.asset_library(),
            rng,
            current_filename: None,
            chords: Vec::new(),
            samples_per_chord: 0,
            status: String::new(),
        }
    }

    /// Build the buffer `request` describes and send it to the engine.
    ///
    /// With `keep_position` set on a playing engine the buffer is hot-swapped
    /// and playback continues where it was; otherwise it starts from the top.
    pub fn start_playback(&mut self, request: &PlaybackRequest) {
        let params = request.params.normalized();
        let buffer = match request.source {
            SourceMode::File => self.load_file(request, &params),
            SourceMode::Generated => self.generate(&params),
        };

        if request.keep_position && self.engine.is_playing() {
            self.engine.update_buffer(buffer);
        } else {
            self.engine.play(buffer);
        }
    }

    fn generate(&mut self, params: &ChordParams) -> PlaybackBuffer {
        self.current_filename = None;

        let sequence = self.sequencer.generate(params, &mut self.rng);
        self.samples_per_chord = sequence.samples_per_chord;
        self.status = format!(
            "Playing {} | {} | {}",
            params.key_name(),
            params.waveform,
            params.quality_label()
        );

        let (buffer, chords) = sequence.into_parts();
        self.chords = chords;
        buffer
    }

    fn load_file(&mut self, request: &PlaybackRequest, params: &ChordParams) -> PlaybackBuffer {
        let remembered = if request.keep_position {
            self.current_filename.clone()
        } else {
            None
        };
        let name = remembered
            .or_else(|| request.file_path.clone())
            .or_else(|| self.assets.pick(&mut self.rng).map(str::to_string));

        let (samples, chords) = match name {
            Some(name) => match self.assets.load(&name) {
                Ok(samples) => {
                    let chords = vec![Chord::file(&name)];
                    self.current_filename = Some(name);
                    (samples, chords)
                }
                Err(e) => {
                    match &e {
                        FormatError::NotFound(_) => log::warn!("audio file missing: {}", e),
                        _ => log::error!("cannot load {}: {}", name, e),
                    }
                    (vec![0.0; MISSING_FILE_SAMPLES], Vec::new())
                }
            },
            None => {
                log::warn!("no audio files configured");
                (vec![0.0; MISSING_FILE_SAMPLES], Vec::new())
            }
        };

        let samples = block_downsample(samples, params.downsample_rate, PLAYBACK_RATE);
        self.samples_per_chord = samples.len();
        self.chords = chords;
        self.status = format!(
            "Playing File: {}",
            self.current_filename.as_deref().unwrap_or("none")
        );
        PlaybackBuffer::new(samples)
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.engine.set_volume(volume)
    }

    /// Restart the output at the rate for `percent` speed.
    pub fn set_speed(&mut self, percent: u32) {
        self.engine.update_rate(rate_for_speed(percent));
    }

    /// Status set by the last `start_playback`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Status with progress and the chord currently sounding.
    pub fn live_status(&self) -> String {
        let (_, cursor, buffer_length) = self.engine.get_state();
        live_status(
            &self.status,
            &self.chords,
            self.samples_per_chord,
            cursor,
            buffer_length,
        )
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn samples_per_chord(&self) -> usize {
        self.samples_per_chord
    }

    /// File kept for keep-position requests in file mode.
    pub fn current_filename(&self) -> Option<&str> {
        self.current_filename.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn engine(&self) -> &PlaybackEngine<O> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PlaybackEngine<O> {
        &mut self.engine
    }
}
