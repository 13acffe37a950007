//! JSON file persistence for the image history.
//!
//! Saves are atomic: the collection is serialized to a temporary file in the
//! same directory, fsynced, then renamed over the target. A partially
//! written file can therefore never be observed.

use crate::paths::ForgePaths;
use imgforge_core::error::ForgeError;
use imgforge_core::history::{HistoryCollection, HistoryRepository};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

/// History repository backed by a single JSON file.
pub struct HistoryStorage {
    path: PathBuf,
}

impl HistoryStorage {
    /// Creates a storage handle at the default path
    /// (~/.config/imgforge/history.json).
    pub fn new() -> Result<Self, ForgeError> {
        let path = ForgePaths::history_file().map_err(|e| ForgeError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage handle with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the history file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl HistoryRepository for HistoryStorage {
    /// Loads the persisted history.
    ///
    /// An absent or malformed file loads as an empty collection; there is no
    /// schema versioning on the history file.
    fn load(&self) -> Result<HistoryCollection, ForgeError> {
        if !self.path.exists() {
            return Ok(HistoryCollection::new());
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(history) => Ok(history),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "malformed history file, starting with empty history"
                );
                Ok(HistoryCollection::new())
            }
        }
    }

    /// Writes the full collection atomically.
    fn save(&self, history: &HistoryCollection) -> Result<(), ForgeError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(history)?;
        let temp_path = self.temp_path();

        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), len = history.len(), "history persisted");
        Ok(())
    }

    /// Removes the persisted file entirely.
    fn clear(&self) -> Result<(), ForgeError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
