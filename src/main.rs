//! chordwave CLI: generate random chord progressions and stream them.
//!
//! Usage:
//!   chordwave --key F# --mode Minor --wave "Sine + Triangle" --bpm 90
//!   chordwave --quality 8000 --chords 8 --seconds 10
//!   chordwave --play-file
//!   chordwave --file assets/hollow.wav --speed 150

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use std::{env, process};

use cw_ir::{BPM_MAX, BPM_MIN};
use cw_master::{
    downsample_from_slider, root_index_from_name, speed_label, ChordParams, ParamError,
    PlaybackController, PlaybackRequest, PlaybackStatus, PlayerConfig, ScaleMode, SourceMode,
    WaveformChoice,
};

#[cfg(feature = "alloc_check")]
#[global_allocator]
static A: assert_no_alloc::AllocDisabler = assert_no_alloc::AllocDisabler;

const USAGE: &str = "Usage: chordwave [--bpm N] [--key NOTE] [--mode Major|Minor] \
[--wave NAME] [--quality HZ] [--chords N] [--file PATH | --play-file] [--speed PCT] \
[--volume 0-1] [--seconds S] [--config FILE]";

const POLL_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    bpm: Option<u16>,
    root_index: Option<u8>,
    mode: Option<ScaleMode>,
    wave: Option<String>,
    quality: Option<u32>,
    chords: Option<usize>,
    file: Option<String>,
    play_file: bool,
    speed: Option<u32>,
    volume: Option<f32>,
    seconds: Option<f64>,
    config: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, ParamError> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &'static str| {
            iter.next()
                .map(String::as_str)
                .ok_or_else(|| ParamError::invalid(name, "missing value"))
        };
        match arg.as_str() {
            "--bpm" => cli.bpm = Some(parse_number("bpm", value("bpm")?)?),
            "--key" => cli.root_index = Some(root_index_from_name(value("key")?)?),
            "--mode" => cli.mode = Some(value("mode")?.parse()?),
            "--wave" => cli.wave = Some(value("wave")?.to_string()),
            "--quality" => cli.quality = Some(parse_number("quality", value("quality")?)?),
            "--chords" => cli.chords = Some(parse_number("chords", value("chords")?)?),
            "--file" => cli.file = Some(value("file")?.to_string()),
            "--play-file" => cli.play_file = true,
            "--speed" => cli.speed = Some(parse_number("speed", value("speed")?)?),
            "--volume" => cli.volume = Some(parse_number("volume", value("volume")?)?),
            "--seconds" => cli.seconds = Some(parse_number("seconds", value("seconds")?)?),
            "--config" => cli.config = Some(PathBuf::from(value("config")?)),
            "-h" | "--help" => cli.help = true,
            other => return Err(ParamError::invalid("argument", other)),
        }
    }
    Ok(cli)
}

fn parse_number<T: std::str::FromStr>(name: &'static str, text: &str) -> Result<T, ParamError> {
    text.trim()
        .parse()
        .map_err(|_| ParamError::invalid(name, text))
}

fn build_request(cli: &CliArgs, config: &PlayerConfig) -> PlaybackRequest {
    let params = ChordParams {
        bpm: cli.bpm.unwrap_or(120).clamp(BPM_MIN, BPM_MAX),
        root_index: cli.root_index.unwrap_or(0),
        mode: cli.mode.unwrap_or_default(),
        waveform: WaveformChoice::default(),
        downsample_rate: cli.quality.and_then(downsample_from_slider),
        n_chords: cli.chords.unwrap_or(config.n_chords),
    };

    let mut request = PlaybackRequest::generated(params);
    if let Some(wave) = &cli.wave {
        request.select_wave(wave);
    }
    if cli.play_file || cli.file.is_some() {
        request.source = SourceMode::File;
        request.file_path = cli.file.clone();
    }
    request
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("{}", e);
        eprintln!("{}", USAGE);
        process::exit(1);
    });
    if cli.help {
        println!("{}", USAGE);
        return;
    }

    let config = match &cli.config {
        Some(path) => PlayerConfig::load(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        }),
        None => PlayerConfig::default(),
    };

    let request = build_request(&cli, &config);
    let mut ctrl = PlaybackController::new(&config);
    if !ctrl.engine().is_enabled() {
        eprintln!("No usable audio output; nothing to play.");
        process::exit(1);
    }

    if let Some(volume) = cli.volume {
        let applied = ctrl.set_volume(volume);
        println!("Volume:   {:.0}%", applied * 100.0);
    }
    ctrl.start_playback(&request);
    if let Some(speed) = cli.speed {
        ctrl.set_speed(speed);
        println!("{}", speed_label(request.params.bpm, speed));
    }

    print_summary(&ctrl, &request);
    play(&mut ctrl, cli.seconds.map(Duration::from_secs_f64));
}

fn print_summary(ctrl: &PlaybackController, request: &PlaybackRequest) {
    println!("{}", ctrl.status());
    if request.source == SourceMode::Generated {
        let chords: Vec<String> = ctrl.chords().iter().map(|c| c.note_name.to_string()).collect();
        println!("Chords:   {}", chords.join(" "));
    }
    println!("Samples per slot: {}", ctrl.samples_per_chord());
    println!();
}

fn play(ctrl: &mut PlaybackController, limit: Option<Duration>) {
    let started = Instant::now();
    loop {
        std::thread::sleep(POLL_INTERVAL);
        let snapshot = ctrl.engine().snapshot();
        print!("\r{:<72}", ctrl.live_status());
        let _ = std::io::stdout().flush();

        if snapshot.status() == PlaybackStatus::Exhausted || !ctrl.is_playing() {
            break;
        }
        if limit.is_some_and(|limit| started.elapsed() >= limit) {
            ctrl.stop();
            break;
        }
    }
    println!("\rDone.{:<72}", "");
}
