//! Player configuration.

use std::fs;
use std::path::{Path, PathBuf};

use cw_engine::EngineConfig;
use cw_formats::{AssetLibrary, DEFAULT_ASSETS};
use cw_ir::{DEFAULT_BLOCK_SIZE, PLAYBACK_RATE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings shared by the engine, the controller and the front end.
///
/// Missing JSON fields take their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub sample_rate: u32,
    /// Frames per callback block.
    pub block_size: usize,
    pub volume: f32,
    /// Chords per generated sequence.
    pub n_chords: usize,
    pub asset_dir: PathBuf,
    pub assets: Vec<String>,
    /// Fixed seed for reproducible sequences and file picks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Control commands that may wait for the callback at once.
    pub queue_capacity: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sample_rate: PLAYBACK_RATE,
            block_size: DEFAULT_BLOCK_SIZE,
            volume: 0.5,
            n_chords: 32,
            asset_dir: PathBuf::from("assets"),
            assets: DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
            seed: None,
            queue_capacity: 64,
        }
    }
}

impl PlayerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            sample_rate: self.sample_rate,
            block_size: self.block_size,
            queue_capacity: self.queue_capacity,
            volume: self.volume,
        }
    }

    pub fn asset_library(&self) -> AssetLibrary {
        AssetLibrary::new(self.asset_dir.clone(), self.assets.clone())
    }
}
