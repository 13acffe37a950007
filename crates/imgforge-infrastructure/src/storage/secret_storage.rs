//! Secret configuration file storage.
//!
//! Provides loading of secret configuration from
//! ~/.config/imgforge/secret.json. Read-only: this storage never writes or
//! modifies secret files, and it does not validate credentials.
//!
//! # Security Note
//!
//! This storage reads plaintext JSON files. The secret.json file should have
//! appropriate file permissions (e.g., 600) to prevent unauthorized access.

use crate::paths::ForgePaths;
use imgforge_core::config::SecretConfig;
use imgforge_core::error::ForgeError;
use std::fs;
use std::path::PathBuf;

/// Storage for the secret configuration file (secret.json).
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a new SecretStorage with the default path
    /// (~/.config/imgforge/secret.json).
    pub fn new() -> Result<Self, ForgeError> {
        let path = ForgePaths::secret_file().map_err(|e| ForgeError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded and parsed
    /// - `Err(ForgeError::NotFound)`: File doesn't exist
    /// - `Err(ForgeError::Io)`: Failed to read file
    /// - `Err(ForgeError::Serialization)`: Invalid JSON format
    pub fn load(&self) -> Result<SecretConfig, ForgeError> {
        if !self.path.exists() {
            return Err(ForgeError::not_found(
                "secret config",
                self.path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
