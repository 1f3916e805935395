//! Quiz, question, answer and attempt records as they are stored.

mod answer;
mod error;
mod question;
mod quiz;
mod result;

pub use answer::{Answer, Answers};
pub use error::ValidationError;
pub use question::{Difficulty, Question, QuestionKind};
pub use quiz::{average_difficulty, Quiz};
pub use result::AttemptResult;
