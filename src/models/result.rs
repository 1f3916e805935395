use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answer::Answers;

/// One submitted attempt. Appended once, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub quiz_id: String,
    pub quiz_title: String,
    /// Percentage, 0 to 100.
    pub score: u8,
    #[serde(rename = "correctAnswers")]
    pub correct_count: usize,
    pub total_questions: usize,
    pub answers: Answers,
    pub completed_at: DateTime<Utc>,
}
