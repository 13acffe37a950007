//! Durable authentication marker storage.
//!
//! The marker is a plain file whose presence means "authenticated". Its
//! content is a fixed literal and is never inspected.

use crate::paths::ForgePaths;
use imgforge_core::auth::AuthMarkerRepository;
use imgforge_core::error::ForgeError;
use std::fs;
use std::path::PathBuf;

const MARKER_CONTENT: &str = "authenticated\n";

/// Auth marker repository backed by a marker file.
pub struct AuthMarkerStorage {
    path: PathBuf,
}

impl AuthMarkerStorage {
    /// Creates a storage handle at the default path
    /// (~/.config/imgforge/session).
    pub fn new() -> Result<Self, ForgeError> {
        let path = ForgePaths::session_file().map_err(|e| ForgeError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage handle with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AuthMarkerRepository for AuthMarkerStorage {
    fn exists(&self) -> Result<bool, ForgeError> {
        Ok(self.path.exists())
    }

    fn set(&self) -> Result<(), ForgeError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, MARKER_CONTENT)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ForgeError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_marker_lifecycle() {
        let dir = TempDir::new().unwrap();
        let storage = AuthMarkerStorage::with_path(dir.path().join("session"));

        assert!(!storage.exists().unwrap());

        storage.set().unwrap();
        assert!(storage.exists().unwrap());

        storage.clear().unwrap();
        assert!(!storage.exists().unwrap());

        // Clearing an absent marker is a no-op.
        storage.clear().unwrap();
        assert!(!storage.exists().unwrap());
    }

    #[test]
    fn test_set_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let storage = AuthMarkerStorage::with_path(dir.path().join("nested/session"));

        storage.set().unwrap();
        assert!(storage.exists().unwrap());
    }
}
