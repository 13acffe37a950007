//! Persistence seam for the image history.

use super::model::HistoryCollection;
use crate::error::ForgeError;

/// Repository abstraction for loading and saving the history collection.
///
/// An absent or malformed persisted value must load as an empty collection;
/// there is no schema versioning.
pub trait HistoryRepository {
    /// Loads the full collection from persistent storage.
    fn load(&self) -> Result<HistoryCollection, ForgeError>;

    /// Writes the full collection, replacing any previous value.
    fn save(&self, history: &HistoryCollection) -> Result<(), ForgeError>;

    /// Removes the persisted value entirely.
    fn clear(&self) -> Result<(), ForgeError>;
}
