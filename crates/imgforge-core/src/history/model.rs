//! Image history domain models.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of top-level image records retained in history.
/// Insertion beyond the cap silently evicts the oldest record(s).
pub const MAX_HISTORY_LEN: usize = 10;

/// A single modification applied to a generated image.
///
/// Modifications are stored most-recent-first on their parent record and
/// are not subject to any cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modification {
    /// Text describing the requested change.
    pub prompt: String,
    /// Resulting image reference (data URL or remote URL).
    pub image_url: String,
    /// Timestamp when the modification was created (RFC 3339 format).
    pub created_at: String,
}

impl Modification {
    /// Creates a new modification stamped with the current time.
    pub fn new(prompt: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_url: image_url.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// A generated image together with its modification history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,
    /// Original text prompt.
    pub prompt: String,
    /// Image reference (data URL or remote URL).
    pub image_url: String,
    /// Timestamp when the record was created (RFC 3339 format).
    pub created_at: String,
    /// Model used to generate the image.
    pub model: String,
    /// Size parameter used to generate the image.
    pub size: String,
    /// Modifications applied to this image, most-recent-first.
    #[serde(default)]
    pub modifications: Vec<Modification>,
}

impl ImageRecord {
    /// Creates a new record with a fresh id, current timestamp and an empty
    /// modification list.
    pub fn new(
        prompt: impl Into<String>,
        image_url: impl Into<String>,
        model: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            image_url: image_url.into(),
            created_at: Utc::now().to_rfc3339(),
            model: model.into(),
            size: size.into(),
            modifications: Vec::new(),
        }
    }

    /// Returns the most recent image reference for this record: the latest
    /// modification's result if any, else the original image.
    pub fn latest_image_url(&self) -> &str {
        self.modifications
            .first()
            .map(|m| m.image_url.as_str())
            .unwrap_or(&self.image_url)
    }
}

/// Ordered sequence of image records, newest at the head.
///
/// Pure in-memory bookkeeping; persistence is layered on by the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryCollection {
    records: Vec<ImageRecord>,
}

impl HistoryCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a record and truncates the tail beyond [`MAX_HISTORY_LEN`].
    pub fn push_front(&mut self, record: ImageRecord) {
        self.records.insert(0, record);
        if self.records.len() > MAX_HISTORY_LEN {
            self.records.truncate(MAX_HISTORY_LEN);
        }
    }

    /// Prepends a modification to the record with the given id.
    ///
    /// Returns `true` if the record was found; an unknown id leaves the
    /// collection untouched.
    pub fn prepend_modification(&mut self, image_id: &str, modification: Modification) -> bool {
        match self.records.iter_mut().find(|r| r.id == image_id) {
            Some(record) => {
                record.modifications.insert(0, modification);
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id, returning `true` if it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// Empties the collection.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Gets a record by its id.
    pub fn get(&self, id: &str) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns the records, newest first.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
