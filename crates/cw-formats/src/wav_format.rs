//! WAV decoding to mono f32 at the playback rate.

use std::io;
use std::path::Path;

use cw_ir::PLAYBACK_RATE;
use hound::{SampleFormat, WavReader};

use crate::FormatError;

/// Load `path` as mono samples at [`PLAYBACK_RATE`].
pub fn load_wav(path: &Path) -> Result<Vec<f32>, FormatError> {
    load_wav_at(path, PLAYBACK_RATE)
}

/// Load `path`, mix every channel down to mono and resample to `target_rate`.
pub fn load_wav_at(path: &Path, target_rate: u32) -> Result<Vec<f32>, FormatError> {
    let mut reader = WavReader::open(path).map_err(|e| map_open_error(path, e))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(FormatError::Unsupported(format!(
                    "{}-bit float",
                    spec.bits_per_sample
                )));
            }
            reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(map_read_error)?
        }
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(FormatError::Unsupported(format!(
                    "{}-bit integer",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|x| x as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(map_read_error)?
        }
    };

    let mono = mix_to_mono(&interleaved, spec.channels.max(1) as usize);
    log::debug!(
        "loaded {}: {} frames, {} ch, {} Hz",
        path.display(),
        mono.len(),
        spec.channels,
        spec.sample_rate
    );
    Ok(resample_linear(&mono, spec.sample_rate, target_rate))
}

fn mix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Linear-interpolating rate conversion. Identity when the rates match.
pub fn resample_linear(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate || source_rate == 0 || target_rate == 0 || samples.is_empty() {
        return samples.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (samples.len() as f64 * ratio).ceil() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 / ratio;
            let idx = pos.floor() as usize;
            if idx >= last {
                return samples[last];
            }
            let frac = (pos - idx as f64) as f32;
            samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
        })
        .collect()
}

fn map_open_error(path: &Path, err: hound::Error) -> FormatError {
    match err {
        hound::Error::IoError(e) if e.kind() == io::ErrorKind::NotFound => {
            FormatError::NotFound(path.display().to_string())
        }
        other => map_read_error(other),
    }
}

fn map_read_error(err: hound::Error) -> FormatError {
    match err {
        hound::Error::IoError(e) => FormatError::Io(e),
        hound::Error::Unsupported => FormatError::Unsupported("wav layout".into()),
        other => FormatError::Decode(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cw-formats-{}-{}", std::process::id(), name))
    }

    fn write_i16(path: &Path, channels: u16, rate: u32, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_mono_int_at_playback_rate() {
        let path = temp_path("mono.wav");
        write_i16(&path, 1, 44100, &[0, 16384, -16384, 32767]);
        let samples = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 0.5).abs() < 1e-6);
        assert!((samples[2] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn stereo_is_averaged() {
        let path = temp_path("stereo.wav");
        write_i16(&path, 2, 44100, &[16384, 0, -16384, -16384]);
        let samples = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(samples.len(), 2);
        assert!((samples[0] - 0.25).abs() < 1e-6);
        assert!((samples[1] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn float_samples_pass_through() {
        let path = temp_path("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in [0.1f32, -0.7, 0.9] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        let samples = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(samples, vec![0.1, -0.7, 0.9]);
    }

    #[test]
    fn lower_rates_are_resampled_up() {
        let path = temp_path("22k.wav");
        write_i16(&path, 1, 22050, &[0; 100]);
        let samples = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(samples.len(), 200);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_wav(&temp_path("does-not-exist.wav")).unwrap_err();
        assert!(matches!(err, FormatError::NotFound(_)));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let path = temp_path("garbage.wav");
        std::fs::write(&path, b"definitely not a riff file").unwrap();
        let err = load_wav(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, FormatError::Decode(_) | FormatError::Io(_)));
    }

    #[test]
    fn resample_interpolates_between_neighbours() {
        let out = resample_linear(&[0.0, 1.0], 1, 2);
        assert_eq!(out, vec![0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn resample_identity_when_rates_match() {
        let input = vec![0.3, -0.2, 0.1];
        assert_eq!(resample_linear(&input, 44100, 44100), input);
    }
}
