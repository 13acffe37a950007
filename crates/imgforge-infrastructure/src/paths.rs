//! Unified path management for imgforge configuration files.
//!
//! All configuration, secrets and history live under a single per-user
//! config directory. This ensures consistency across platforms.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for imgforge.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/imgforge/          # Config directory
/// ├── secret.json              # Passcode and API credentials
/// ├── history.json             # Persisted image history
/// └── session                  # Durable authentication marker
/// ```
pub struct ForgePaths;

impl ForgePaths {
    /// Returns the imgforge configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("imgforge"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to secret.json.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the persisted image history.
    pub fn history_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("history.json"))
    }

    /// Returns the path to the authentication marker file.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        if dirs::config_dir().is_none() {
            // No HOME in this environment; nothing to assert.
            return;
        }
        let dir = ForgePaths::config_dir().unwrap();
        assert!(dir.ends_with("imgforge"));
        assert_eq!(ForgePaths::secret_file().unwrap(), dir.join("secret.json"));
        assert_eq!(ForgePaths::history_file().unwrap(), dir.join("history.json"));
        assert_eq!(ForgePaths::session_file().unwrap(), dir.join("session"));
    }
}
