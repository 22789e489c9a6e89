//! Browser LocalStorage store (wasm32)

use super::{ProgressStore, STORAGE_KEY};
use crate::error::StoreError;
use crate::progress::Progress;

/// Progress kept under [`STORAGE_KEY`] in LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ProgressStore for LocalStorageStore {
    fn load(&self) -> Progress {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                    log::info!("Loaded progress ({} best scores)", progress.best_scores.len());
                    return progress;
                }
            }
        }

        log::info!("No progress found, starting fresh");
        Progress::default()
    }

    fn save(&mut self, progress: &Progress) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not available".into()))?;
        let json = serde_json::to_string(progress)?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Progress saved");
        Ok(())
    }
}
