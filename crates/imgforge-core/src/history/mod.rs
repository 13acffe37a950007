//! Bounded image history: domain models, persistence seam and store.

pub mod model;
pub mod repository;
pub mod store;

pub use model::{HistoryCollection, ImageRecord, Modification, MAX_HISTORY_LEN};
pub use repository::HistoryRepository;
pub use store::HistoryStore;
