//! Filesystem infrastructure for imgforge: paths and file-backed storage.

pub mod paths;
pub mod storage;

pub use paths::ForgePaths;
pub use storage::{AuthMarkerStorage, HistoryStorage, SecretStorage};
