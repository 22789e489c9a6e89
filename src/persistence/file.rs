//! JSON file store (native)

use std::fs;
use std::path::{Path, PathBuf};

use super::ProgressStore;
use crate::error::StoreError;
use crate::progress::Progress;

/// Progress kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Progress {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No progress at {}, starting fresh", self.path.display());
                return Progress::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(progress) => {
                log::info!("Loaded progress from {}", self.path.display());
                progress
            }
            Err(e) => {
                log::warn!("Corrupt progress file {}: {}", self.path.display(), e);
                Progress::default()
            }
        }
    }

    fn save(&mut self, progress: &Progress) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(progress)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Progress saved to {}", self.path.display());
        Ok(())
    }
}
