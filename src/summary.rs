//! Figures shown alongside the quiz list and attempt history.

use std::collections::HashSet;

use crate::models::{AttemptResult, Quiz};
use crate::scoring::percentage;

/// Remaining time below this is shown as running low.
pub const LOW_TIME_SECS: u32 = 300;

/// Counts for the catalog header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub quizzes: usize,
    /// Distinct quizzes with at least one result.
    pub completed: usize,
    /// Mean score over every result, 0 when there are none.
    pub average_score: u8,
    pub remaining: usize,
}

impl CatalogStats {
    pub fn collect(quizzes: &[Quiz], results: &[AttemptResult]) -> Self {
        let completed = completed_quiz_ids(results).len();

        Self {
            quizzes: quizzes.len(),
            completed,
            average_score: average_score(results),
            remaining: quizzes.len().saturating_sub(completed),
        }
    }
}

pub fn completed_quiz_ids(results: &[AttemptResult]) -> HashSet<&str> {
    results.iter().map(|r| r.quiz_id.as_str()).collect()
}

/// The earliest stored result for `quiz_id`.
pub fn first_result_for<'a>(results: &'a [AttemptResult], quiz_id: &str) -> Option<&'a AttemptResult> {
    results.iter().find(|r| r.quiz_id == quiz_id)
}

pub fn attempts_for(results: &[AttemptResult], quiz_id: &str) -> usize {
    results.iter().filter(|r| r.quiz_id == quiz_id).count()
}

pub fn average_score(results: &[AttemptResult]) -> u8 {
    let total: u64 = results.iter().map(|r| u64::from(r.score)).sum();
    // Mean of percentages, same rounding as a single score.
    percentage(total, (results.len() as u64).saturating_mul(100))
}

/// `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn is_running_low(seconds: u32) -> bool {
    seconds < LOW_TIME_SECS
}

/// Share of the quiz reached when on question `index` (0-based).
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    percentage((index + 1).min(total) as u64, total as u64)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::Answers;

    fn result(quiz_id: &str, score: u8) -> AttemptResult {
        AttemptResult {
            quiz_id: quiz_id.to_string(),
            quiz_title: String::new(),
            score,
            correct_count: 0,
            total_questions: 0,
            answers: Answers::new(),
            completed_at: Utc::now(),
        }
    }

    fn quiz(id: &str) -> Quiz {
        Quiz {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            time_limit: 1,
            questions: Vec::new(),
            adaptive_mode: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats() {
        let quizzes = [quiz("a"), quiz("b"), quiz("c")];
        let results = [result("a", 40), result("a", 80), result("b", 75)];
        let stats = CatalogStats::collect(&quizzes, &results);

        assert_eq!(
            stats,
            CatalogStats {
                quizzes: 3,
                completed: 2,
                average_score: 65,
                remaining: 1,
            }
        );
        assert_eq!(CatalogStats::collect(&[], &[]), CatalogStats::default());
    }

    #[test]
    fn test_first_result_is_earliest() {
        let results = [result("a", 40), result("b", 10), result("a", 90)];
        assert_eq!(first_result_for(&results, "a").map(|r| r.score), Some(40));
        assert_eq!(attempts_for(&results, "a"), 2);
        assert!(first_result_for(&results, "z").is_none());
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(average_score(&[result("a", 50), result("b", 51)]), 51);
        assert_eq!(average_score(&[]), 0);
    }

    #[test]
    fn test_clock_and_progress() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(1800), "30:00");
        assert!(is_running_low(299));
        assert!(!is_running_low(300));
        assert_eq!(progress_percent(0, 3), 33);
        assert_eq!(progress_percent(2, 3), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }
}
