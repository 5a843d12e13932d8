//! Catalog of bundled audio files.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::wav_format::load_wav;
use crate::FormatError;

/// Files shipped in the asset directory.
pub const DEFAULT_ASSETS: [&str; 6] = [
    "kewgardens.wav",
    "eastersunday.wav",
    "hollandpark.wav",
    "hollow.wav",
    "satelite.wav",
    "stairway.wav",
];

/// Length of the silent stand-in for a file that cannot be read.
pub const MISSING_FILE_SAMPLES: usize = 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct AssetLibrary {
    dir: PathBuf,
    files: Vec<String>,
}

impl AssetLibrary {
    pub fn new(dir: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// The bundled catalog rooted at `dir`.
    pub fn bundled(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Uniformly choose one catalog entry.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.files.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.files.len());
        Some(self.files[i].as_str())
    }

    /// Resolve a catalog name or a path. Absolute paths are used as given.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    pub fn load(&self, name: &str) -> Result<Vec<f32>, FormatError> {
        load_wav(&self.resolve(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bundled_catalog_lists_six_files() {
        let lib = AssetLibrary::bundled("assets");
        assert_eq!(lib.files().len(), 6);
        assert_eq!(lib.files()[0], "kewgardens.wav");
    }

    #[test]
    fn pick_stays_in_catalog() {
        let lib = AssetLibrary::bundled("assets");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let name = lib.pick(&mut rng).unwrap();
            assert!(DEFAULT_ASSETS.contains(&name));
        }
    }

    #[test]
    fn pick_from_empty_catalog() {
        let lib = AssetLibrary::new("assets", Vec::new());
        assert!(lib.pick(&mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn relative_names_resolve_under_dir() {
        let lib = AssetLibrary::bundled("assets");
        assert_eq!(lib.resolve("hollow.wav"), Path::new("assets").join("hollow.wav"));
        let abs = std::env::temp_dir().join("x.wav");
        assert_eq!(lib.resolve(abs.to_str().unwrap()), abs);
    }

    #[test]
    fn missing_asset_reports_not_found() {
        let lib = AssetLibrary::bundled(std::env::temp_dir().join("cw-no-such-dir"));
        assert!(matches!(lib.load("hollow.wav"), Err(FormatError::NotFound(_))));
    }
}
