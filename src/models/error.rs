use thiserror::Error;

/// A quiz definition that breaks one of the catalog invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Quiz title must not be empty")]
    EmptyTitle,

    #[error("Time limit must be at least one minute")]
    ZeroTimeLimit,

    #[error("Question id {0:?} is used more than once")]
    DuplicateQuestionId(String),

    #[error("Question {0:?} must be worth at least one point")]
    ZeroPoints(String),

    #[error("Quiz is worth {0} points in total, more than {max}", max = u32::MAX)]
    TotalPointsTooLarge(u64),

    #[error("Question {question_id:?} marks option {index} correct but has only {len} options")]
    CorrectAnswerOutOfBounds {
        question_id: String,
        index: usize,
        len: usize,
    },
}
