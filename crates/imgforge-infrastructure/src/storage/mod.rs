//! File-backed storage implementations.

pub mod auth_storage;
pub mod history_storage;
pub mod secret_storage;

pub use auth_storage::AuthMarkerStorage;
pub use history_storage::HistoryStorage;
pub use secret_storage::SecretStorage;
