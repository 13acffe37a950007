//! Persistence seam for the durable authentication marker.

use crate::error::ForgeError;

/// Repository abstraction over the durable authentication marker.
///
/// The marker carries presence/absence semantics only; its content is never
/// inspected.
pub trait AuthMarkerRepository {
    /// Returns whether the marker is currently present.
    fn exists(&self) -> Result<bool, ForgeError>;

    /// Persists the marker.
    fn set(&self) -> Result<(), ForgeError>;

    /// Removes the marker, if present.
    fn clear(&self) -> Result<(), ForgeError>;
}
