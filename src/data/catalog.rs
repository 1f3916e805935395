//! The two persisted lists: saved quizzes and attempt results.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::{AttemptResult, Quiz};

use super::error::StoreError;
use super::storage::Storage;

pub const SAVED_QUIZZES_KEY: &str = "savedQuizzes";
pub const QUIZ_RESULTS_KEY: &str = "quizResults";

/// Access to saved quizzes and attempt results.
///
/// Reads never fail: a missing or unreadable list comes back empty, and
/// records that do not parse are skipped. Writes replace the whole list and
/// report storage failures to the caller.
pub trait CatalogStore {
    fn load_quizzes(&self) -> Vec<Quiz>;

    fn load_results(&self) -> Vec<AttemptResult>;

    /// Read, append, write back. Not safe against concurrent writers: the
    /// last writer wins.
    fn append_result(&mut self, result: AttemptResult) -> Result<(), StoreError>;

    /// Replace the quiz with the same id, or append it.
    fn save_quiz(&mut self, quiz: Quiz) -> Result<(), StoreError>;

    fn find_quiz(&self, id: &str) -> Option<Quiz> {
        self.load_quizzes().into_iter().find(|quiz| quiz.id == id)
    }
}

/// [`CatalogStore`] over any [`Storage`] backend.
#[derive(Debug, Clone, Default)]
pub struct Catalog<S> {
    storage: S,
}

impl<S: Storage> Catalog<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key, error = %err, "failed to read catalog list, treating as empty");
                return Vec::new();
            }
        };

        let items: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(key, error = %err, "malformed catalog list, treating as empty");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(key, index, error = %err, "skipping unreadable catalog record");
                    None
                }
            })
            .collect()
    }

    fn write_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.storage.set(key, &raw)?;
        Ok(())
    }
}

impl<S: Storage> CatalogStore for Catalog<S> {
    fn load_quizzes(&self) -> Vec<Quiz> {
        self.read_list(SAVED_QUIZZES_KEY)
    }

    fn load_results(&self) -> Vec<AttemptResult> {
        self.read_list(QUIZ_RESULTS_KEY)
    }

    fn append_result(&mut self, result: AttemptResult) -> Result<(), StoreError> {
        let mut results = self.load_results();
        info!(
            quiz_id = %result.quiz_id,
            score = result.score,
            previous = results.len(),
            "appending attempt result"
        );
        results.push(result);
        self.write_list(QUIZ_RESULTS_KEY, &results)
    }

    fn save_quiz(&mut self, quiz: Quiz) -> Result<(), StoreError> {
        let mut quizzes = self.load_quizzes();
        match quizzes.iter_mut().find(|stored| stored.id == quiz.id) {
            Some(stored) => {
                info!(quiz_id = %quiz.id, "replacing saved quiz");
                *stored = quiz;
            }
            None => {
                info!(quiz_id = %quiz.id, title = %quiz.title, "saving new quiz");
                quizzes.push(quiz);
            }
        }
        self.write_list(SAVED_QUIZZES_KEY, &quizzes)
    }
}
