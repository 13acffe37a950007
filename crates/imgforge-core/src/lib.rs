pub mod auth;
pub mod config;
pub mod error;
pub mod history;
pub mod images;

// Re-export common error type
pub use error::ForgeError;
