//! Image history store.
//!
//! The store exclusively owns the collection; all reads and writes of the
//! persisted history go through it. Every mutator persists the full
//! collection before returning, so in-memory state and storage never
//! diverge after a mutation completes.

use super::model::{HistoryCollection, ImageRecord, Modification};
use super::repository::HistoryRepository;
use crate::error::ForgeError;

/// State container for the bounded image history, backed by a repository.
pub struct HistoryStore<R: HistoryRepository> {
    history: HistoryCollection,
    repository: R,
}

impl<R: HistoryRepository> HistoryStore<R> {
    /// Loads the persisted collection and wraps it in a store.
    pub fn load(repository: R) -> Result<Self, ForgeError> {
        let history = repository.load()?;
        Ok(Self {
            history,
            repository,
        })
    }

    /// Adds a freshly generated image at the head of the history, evicting
    /// the oldest record(s) beyond the cap. Returns the new record's id.
    pub fn add_image(
        &mut self,
        prompt: impl Into<String>,
        image_url: impl Into<String>,
        model: impl Into<String>,
        size: impl Into<String>,
    ) -> Result<String, ForgeError> {
        let record = ImageRecord::new(prompt, image_url, model, size);
        let id = record.id.clone();
        self.history.push_front(record);
        self.repository.save(&self.history)?;
        tracing::debug!(id = %id, len = self.history.len(), "added image to history");
        Ok(id)
    }

    /// Prepends a modification to the record with the given id.
    ///
    /// An unknown id is a silent no-op; the collection is still persisted
    /// only when it actually changed.
    pub fn add_modification(
        &mut self,
        image_id: &str,
        prompt: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<(), ForgeError> {
        let modification = Modification::new(prompt, image_url);
        if self.history.prepend_modification(image_id, modification) {
            self.repository.save(&self.history)?;
        } else {
            tracing::debug!(id = %image_id, "modification target not found, skipping");
        }
        Ok(())
    }

    /// Removes the record with the given id, if present. Idempotent.
    pub fn delete_image(&mut self, id: &str) -> Result<(), ForgeError> {
        if self.history.remove(id) {
            self.repository.save(&self.history)?;
        }
        Ok(())
    }

    /// Empties the collection and removes the persisted copy entirely.
    pub fn clear(&mut self) -> Result<(), ForgeError> {
        self.history.clear();
        self.repository.clear()
    }

    /// Gets a record by its id.
    pub fn get(&self, id: &str) -> Option<&ImageRecord> {
        self.history.get(id)
    }

    /// Returns the records, newest first.
    pub fn records(&self) -> &[ImageRecord] {
        self.history.records()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::model::MAX_HISTORY_LEN;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory repository that records what was last persisted.
    #[derive(Clone, Default)]
    struct MemoryRepository {
        persisted: Rc<RefCell<Option<HistoryCollection>>>,
    }

    impl HistoryRepository for MemoryRepository {
        fn load(&self) -> Result<HistoryCollection, ForgeError> {
            Ok(self
                .persisted
                .borrow()
                .clone()
                .unwrap_or_default())
        }

        fn save(&self, history: &HistoryCollection) -> Result<(), ForgeError> {
            *self.persisted.borrow_mut() = Some(history.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), ForgeError> {
            *self.persisted.borrow_mut() = None;
            Ok(())
        }
    }

    fn store() -> (HistoryStore<MemoryRepository>, MemoryRepository) {
        let repo = MemoryRepository::default();
        (HistoryStore::load(repo.clone()).unwrap(), repo)
    }

    #[test]
    fn test_add_image_persists_immediately() {
        let (mut store, repo) = store();
        let id = store
            .add_image("a red balloon", "data:image/png;base64,AA", "gpt-image-1", "auto")
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, id);

        let persisted = repo.persisted.borrow().clone().unwrap();
        assert_eq!(persisted.records()[0].id, id);
        assert_eq!(persisted.records()[0].prompt, "a red balloon");
    }

    #[test]
    fn test_eleventh_add_evicts_oldest() {
        let (mut store, repo) = store();
        let mut first_id = String::new();
        for i in 0..MAX_HISTORY_LEN + 1 {
            let id = store
                .add_image(format!("prompt {i}"), "url", "gpt-image-1", "auto")
                .unwrap();
            if i == 0 {
                first_id = id;
            }
        }

        assert_eq!(store.len(), MAX_HISTORY_LEN);
        assert!(store.get(&first_id).is_none());
        let persisted = repo.persisted.borrow().clone().unwrap();
        assert_eq!(persisted.len(), MAX_HISTORY_LEN);
    }

    #[test]
    fn test_add_modification_known_and_unknown_id() {
        let (mut store, repo) = store();
        let id = store.add_image("base", "u0", "gpt-image-1", "auto").unwrap();
        let other = store.add_image("other", "u1", "gpt-image-1", "auto").unwrap();

        store.add_modification(&id, "make it blue", "u2").unwrap();
        assert_eq!(store.get(&id).unwrap().modifications.len(), 1);
        // Sibling records are untouched.
        assert!(store.get(&other).unwrap().modifications.is_empty());

        let before = repo.persisted.borrow().clone();
        store.add_modification("missing", "noop", "u3").unwrap();
        assert_eq!(*repo.persisted.borrow(), before);
    }

    #[test]
    fn test_delete_image_is_idempotent() {
        let (mut store, _repo) = store();
        let id = store.add_image("base", "u0", "gpt-image-1", "auto").unwrap();

        store.delete_image(&id).unwrap();
        assert!(store.is_empty());
        store.delete_image(&id).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_removes_persisted_entry() {
        let (mut store, repo) = store();
        store.add_image("base", "u0", "gpt-image-1", "auto").unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(repo.persisted.borrow().is_none());
    }

    #[test]
    fn test_reload_round_trips_collection() {
        let (mut store, repo) = store();
        let id = store.add_image("base", "u0", "gpt-image-1", "auto").unwrap();
        store.add_modification(&id, "tweak", "u1").unwrap();
        store.add_image("newer", "u2", "gpt-image-1", "1024x1024").unwrap();

        let records = store.records().to_vec();
        let reloaded = HistoryStore::load(repo).unwrap();
        assert_eq!(reloaded.records(), records.as_slice());
    }
}
