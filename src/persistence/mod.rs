//! Progress persistence
//!
//! Stores:
//! - `JsonFileStore`: JSON file with tmp → save rename (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//! - `MemoryStore`: in-process, for tests and headless runs
//!
//! A missing or corrupt record loads as defaults; it never blocks play.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::error::StoreError;
use crate::progress::Progress;

/// Storage key / file stem shared by every store
pub const STORAGE_KEY: &str = "typerush-progress-v1";

/// Where progress lives between sessions
pub trait ProgressStore {
    /// Load progress, falling back to defaults
    fn load(&self) -> Progress;
    fn save(&mut self, progress: &Progress) -> Result<(), StoreError>;
}

/// Keeps progress in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub saved: Option<Progress>,
    /// Number of successful saves
    pub writes: usize,
    /// Make every save fail
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(progress: Progress) -> Self {
        Self {
            saved: Some(progress),
            ..Self::default()
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Progress {
        self.saved.clone().unwrap_or_default()
    }

    fn save(&mut self, progress: &Progress) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("memory store is read-only".into()));
        }
        self.saved = Some(progress.clone());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), Progress::default());

        let mut progress = Progress::default();
        progress.sound_enabled = false;
        store.save(&progress).unwrap();
        assert!(!store.load().sound_enabled);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_memory_store_failure() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        assert!(store.save(&Progress::default()).is_err());
        assert_eq!(store.writes, 0);
    }
}
