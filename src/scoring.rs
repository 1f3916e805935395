//! Grading a submitted attempt and recording the result.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::data::{CatalogStore, StoreError};
use crate::models::{Answer, Answers, AttemptResult, Question, QuestionKind, Quiz};

/// Per-question grading outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub correct: bool,
    pub points_awarded: u32,
}

/// Full grading of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub score: u8,
    pub correct_count: usize,
    pub total_questions: usize,
    pub earned_points: u64,
    pub total_points: u64,
    pub outcomes: Vec<QuestionOutcome>,
}

impl Grade {
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            score: self.score,
            correct_count: self.correct_count,
            total_questions: self.total_questions,
        }
    }

    pub fn incorrect_count(&self) -> usize {
        self.total_questions - self.correct_count
    }

    pub fn outcome(&self, question_id: &str) -> Option<&QuestionOutcome> {
        self.outcomes.iter().find(|o| o.question_id == question_id)
    }
}

/// What the caller shows right after submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: u8,
    pub correct_count: usize,
    pub total_questions: usize,
}

/// Whether `answer` is correct for `question`.
///
/// Choice and true/false questions need the exact option index. Short
/// answers pass when the trimmed, lower-cased reference text occurs inside
/// the trimmed, lower-cased submission. Coding questions are never graded
/// automatically. A missing answer is always wrong.
pub fn is_correct(question: &Question, answer: Option<&Answer>) -> bool {
    let Some(answer) = answer else {
        return false;
    };

    match question.kind {
        QuestionKind::MultipleChoice | QuestionKind::TrueFalse => {
            match (&question.correct_answer, answer) {
                (Some(Answer::Choice(expected)), Answer::Choice(given)) => expected == given,
                _ => false,
            }
        }
        QuestionKind::ShortAnswer => {
            let reference = question
                .correct_answer
                .as_ref()
                .and_then(Answer::as_text)
                .map(normalize)
                .unwrap_or_default();
            let given = answer.as_text().map(normalize).unwrap_or_default();

            !reference.is_empty() && !given.is_empty() && given.contains(&reference)
        }
        QuestionKind::Coding => false,
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// `earned / total` as a whole percentage, rounding halves up.
///
/// A total of zero scores zero.
pub fn percentage(earned: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }

    let earned = u128::from(earned.min(total));
    let total = u128::from(total);
    // round(e * 100 / t) == floor((200e + t) / 2t)
    ((earned * 200 + total) / (total * 2)) as u8
}

/// Grade every question of `quiz` against `answers`.
pub fn grade(quiz: &Quiz, answers: &Answers) -> Grade {
    let mut total_points: u64 = 0;
    let mut earned_points: u64 = 0;
    let mut correct_count = 0;
    let mut outcomes = Vec::with_capacity(quiz.questions.len());

    for question in &quiz.questions {
        total_points += u64::from(question.points);

        let correct = is_correct(question, answers.get(&question.id));
        let points_awarded = if correct { question.points } else { 0 };
        if correct {
            correct_count += 1;
            earned_points += u64::from(question.points);
        }

        outcomes.push(QuestionOutcome {
            question_id: question.id.clone(),
            correct,
            points_awarded,
        });
    }

    Grade {
        score: percentage(earned_points, total_points),
        correct_count,
        total_questions: quiz.questions.len(),
        earned_points,
        total_points,
        outcomes,
    }
}

/// Grade the attempt and append its result to the catalog.
///
/// A failed write is returned as is; nothing is retried.
pub fn submit<S>(
    store: &mut S,
    quiz: &Quiz,
    answers: &Answers,
    completed_at: DateTime<Utc>,
) -> Result<Grade, StoreError>
where
    S: CatalogStore + ?Sized,
{
    let grade = grade(quiz, answers);

    info!(
        quiz_id = %quiz.id,
        score = grade.score,
        correct = grade.correct_count,
        total = grade.total_questions,
        "attempt submitted"
    );

    store.append_result(AttemptResult {
        quiz_id: quiz.id.clone(),
        quiz_title: quiz.title.clone(),
        score: grade.score,
        correct_count: grade.correct_count,
        total_questions: grade.total_questions,
        answers: answers.clone(),
        completed_at,
    })?;

    Ok(grade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Catalog, MemoryStorage};
    use crate::models::Difficulty;

    fn question(id: &str, kind: QuestionKind, correct: Option<Answer>, points: u32) -> Question {
        let options = match kind {
            QuestionKind::MultipleChoice => Some(vec!["A".into(), "B".into(), "C".into(), "D".into()]),
            QuestionKind::TrueFalse => Some(vec!["True".into(), "False".into()]),
            _ => None,
        };
        Question {
            id: id.to_string(),
            kind,
            prompt: format!("Question {id}"),
            options,
            correct_answer: correct,
            explanation: None,
            difficulty: Difficulty::Medium,
            points,
        }
    }

    fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: "quiz-1".to_string(),
            title: "Sample".to_string(),
            description: String::new(),
            time_limit: 10,
            questions,
            adaptive_mode: false,
            created_at: Utc::now(),
        }
    }

    fn answers(pairs: &[(&str, Answer)]) -> Answers {
        pairs
            .iter()
            .map(|(id, answer)| (id.to_string(), answer.clone()))
            .collect()
    }

    #[test]
    fn test_weighted_partial_score() {
        let quiz = quiz(vec![
            question("q1", QuestionKind::MultipleChoice, Some(Answer::Choice(0)), 2),
            question("q2", QuestionKind::MultipleChoice, Some(Answer::Choice(1)), 3),
        ]);
        let grade = grade(&quiz, &answers(&[("q1", Answer::Choice(0)), ("q2", Answer::Choice(2))]));

        assert_eq!(grade.correct_count, 1);
        assert_eq!(grade.earned_points, 2);
        assert_eq!(grade.total_points, 5);
        assert_eq!(grade.score, 40);
        assert!(grade.outcome("q1").unwrap().correct);
        assert_eq!(grade.outcome("q2").unwrap().points_awarded, 0);
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        let grade = grade(&quiz(vec![]), &Answers::new());
        assert_eq!(grade.score, 0);
        assert_eq!(grade.total_questions, 0);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_all_correct_choice_quiz() {
        let quiz = quiz(vec![
            question("a", QuestionKind::MultipleChoice, Some(Answer::Choice(3)), 1),
            question("b", QuestionKind::TrueFalse, Some(Answer::Choice(1)), 4),
            question("c", QuestionKind::MultipleChoice, Some(Answer::Choice(0)), 2),
        ]);
        let grade = grade(
            &quiz,
            &answers(&[("a", Answer::Choice(3)), ("b", Answer::Choice(1)), ("c", Answer::Choice(0))]),
        );
        assert_eq!(grade.score, 100);
        assert_eq!(grade.correct_count, grade.total_questions);
    }

    #[test]
    fn test_no_answers_nothing_correct() {
        let quiz = quiz(vec![
            question("a", QuestionKind::MultipleChoice, Some(Answer::Choice(0)), 1),
            question("b", QuestionKind::ShortAnswer, Some("x".into()), 1),
            question("c", QuestionKind::TrueFalse, None, 1),
            question("d", QuestionKind::Coding, None, 1),
        ]);
        let grade = grade(&quiz, &Answers::new());
        assert_eq!(grade.correct_count, 0);
        assert_eq!(grade.score, 0);
    }

    #[test]
    fn test_choice_needs_matching_variant() {
        let q = question("a", QuestionKind::MultipleChoice, Some(Answer::Choice(0)), 1);
        assert!(is_correct(&q, Some(&Answer::Choice(0))));
        assert!(!is_correct(&q, Some(&"0".into())));
        assert!(!is_correct(&q, None));
    }

    #[test]
    fn test_short_answer_containment() {
        let q = question("s", QuestionKind::ShortAnswer, Some("paris".into()), 1);
        assert!(is_correct(&q, Some(&"  Paris, France ".into())));
        assert!(is_correct(&q, Some(&"PARIS".into())));
        assert!(!is_correct(&q, Some(&"par".into())));
        assert!(!is_correct(&q, Some(&"   ".into())));
        assert!(!is_correct(&q, Some(&Answer::Choice(0))));

        let blank_reference = question("s", QuestionKind::ShortAnswer, Some("  ".into()), 1);
        assert!(!is_correct(&blank_reference, Some(&"anything".into())));
    }

    #[test]
    fn test_coding_never_correct() {
        let q = question("c", QuestionKind::Coding, Some("fn main() {}".into()), 5);
        assert!(!is_correct(&q, Some(&"fn main() {}".into())));

        let quiz = quiz(vec![q]);
        let grade = grade(&quiz, &answers(&[("c", "fn main() {}".into())]));
        assert_eq!(grade.correct_count, 0);
        assert_eq!(grade.score, 0);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_huge_point_values_do_not_overflow() {
        let quiz = quiz(vec![
            question("a", QuestionKind::TrueFalse, Some(Answer::Choice(0)), 3_000_000_000),
            question("b", QuestionKind::TrueFalse, Some(Answer::Choice(1)), 3_000_000_000),
        ]);
        let grade = grade(&quiz, &answers(&[("a", Answer::Choice(0)), ("b", Answer::Choice(0))]));

        assert_eq!(grade.total_points, 6_000_000_000);
        assert_eq!(grade.earned_points, 3_000_000_000);
        assert_eq!(grade.score, 50);
        assert_eq!(percentage(u64::MAX, u64::MAX), 100);
    }

    #[test]
    fn test_submit_appends_result() {
        let quiz = quiz(vec![
            question("q1", QuestionKind::MultipleChoice, Some(Answer::Choice(0)), 2),
            question("q2", QuestionKind::ShortAnswer, Some("rust".into()), 2),
        ]);
        let given = answers(&[("q1", Answer::Choice(0)), ("q2", "I like Rust".into())]);
        let mut store = Catalog::new(MemoryStorage::new());

        let first = submit(&mut store, &quiz, &given, Utc::now()).unwrap();
        let second = submit(&mut store, &quiz, &Answers::new(), Utc::now()).unwrap();
        assert_eq!(first.summary().score, 100);
        assert_eq!(second.summary().score, 0);

        let results = store.load_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].quiz_title, "Sample");
        assert_eq!(results[0].correct_count, 2);
        assert_eq!(results[0].answers, given);
        assert_eq!(results[1].score, 0);
    }

    #[test]
    fn test_submit_write_failure_is_returned() {
        let quiz = quiz(vec![question("q1", QuestionKind::TrueFalse, Some(Answer::Choice(0)), 1)]);
        let mut store = Catalog::new(MemoryStorage::with_quota(8));
        assert!(submit(&mut store, &quiz, &Answers::new(), Utc::now()).is_err());
    }
}
