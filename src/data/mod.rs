//! Persistence: key-value storage, the quiz catalog, and quiz file import.

mod catalog;
mod error;
mod loader;
mod storage;

pub use catalog::{Catalog, CatalogStore, QUIZ_RESULTS_KEY, SAVED_QUIZZES_KEY};
pub use error::{LoadError, StorageError, StoreError};
pub use loader::load_quizzes_from_path;
pub use storage::{FileStorage, MemoryStorage, Storage};
