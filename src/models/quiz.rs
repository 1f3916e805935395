use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::question::{Difficulty, Question};

/// A stored quiz definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Minutes.
    pub time_limit: u32,
    pub questions: Vec<Question>,
    /// Recorded but not used by grading.
    pub adaptive_mode: bool,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit.saturating_mul(60)
    }

    pub fn total_points(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points)).sum()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn average_difficulty(&self) -> Option<Difficulty> {
        average_difficulty(&self.questions)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        if self.time_limit == 0 {
            return Err(ValidationError::ZeroTimeLimit);
        }

        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(ValidationError::DuplicateQuestionId(question.id.clone()));
            }
            question.validate()?;
        }

        let total = self.total_points();
        if total > u64::from(u32::MAX) {
            return Err(ValidationError::TotalPointsTooLarge(total));
        }

        Ok(())
    }
}

/// Mean difficulty weight bucketed back into a level.
///
/// A mean of at most 1.5 is easy, at most 2.5 is medium, anything above is
/// hard. Returns `None` for an empty question set.
pub fn average_difficulty(questions: &[Question]) -> Option<Difficulty> {
    if questions.is_empty() {
        return None;
    }

    let count = questions.len() as u32;
    let sum: u32 = questions.iter().map(|q| q.difficulty.weight()).sum();

    // Compare sum / count against 1.5 and 2.5 without leaving integers.
    let level = if sum * 2 <= count * 3 {
        Difficulty::Easy
    } else if sum * 2 <= count * 5 {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    };

    Some(level)
}
