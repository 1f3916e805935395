//! Assembling a quiz before it is saved.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Answer, Difficulty, Question, QuestionKind, Quiz, ValidationError};

const DEFAULT_TIME_LIMIT: u32 = 30;

/// A canned question idea offered while building a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub difficulty: Difficulty,
}

const SUGGESTIONS: [Suggestion; 3] = [
    Suggestion {
        kind: QuestionKind::MultipleChoice,
        prompt: "What is the capital of France?",
        difficulty: Difficulty::Easy,
    },
    Suggestion {
        kind: QuestionKind::ShortAnswer,
        prompt: "Explain the concept of photosynthesis",
        difficulty: Difficulty::Medium,
    },
    Suggestion {
        kind: QuestionKind::Coding,
        prompt: "Write a function to reverse a string",
        difficulty: Difficulty::Hard,
    },
];

/// Fixed suggestion list. There is no model behind it.
pub fn suggestions() -> &'static [Suggestion] {
    &SUGGESTIONS
}

/// A quiz being edited. Turned into a [`Quiz`] by [`QuizDraft::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub time_limit: u32,
    pub adaptive_mode: bool,
    questions: Vec<Question>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            time_limit: DEFAULT_TIME_LIMIT,
            adaptive_mode: false,
            questions: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Append a question of `kind` with placeholder content.
    pub fn add_question(&mut self, kind: QuestionKind) -> &mut Question {
        let question = Question {
            id: Uuid::new_v4().to_string(),
            kind,
            prompt: format!("Enter your {} question here...", kind.as_str().replacen('-', " ", 1)),
            options: default_options(kind),
            correct_answer: Some(default_answer(kind)),
            explanation: None,
            difficulty: Difficulty::Medium,
            points: 1,
        };
        self.questions.push(question);
        let last = self.questions.len() - 1;
        &mut self.questions[last]
    }

    pub fn add_suggestion(&mut self, suggestion: &Suggestion) -> &mut Question {
        let question = self.add_question(suggestion.kind);
        question.prompt = suggestion.prompt.to_string();
        question.difficulty = suggestion.difficulty;
        question
    }

    pub fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    /// Returns the removed question, if it existed.
    pub fn remove_question(&mut self, id: &str) -> Option<Question> {
        let index = self.questions.iter().position(|q| q.id == id)?;
        Some(self.questions.remove(index))
    }

    pub fn total_points(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points)).sum()
    }

    /// Freeze into a quiz with a fresh id.
    pub fn build(&self, created_at: DateTime<Utc>) -> Result<Quiz, ValidationError> {
        let quiz = Quiz {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            time_limit: self.time_limit,
            questions: self.questions.clone(),
            adaptive_mode: self.adaptive_mode,
            created_at,
        };
        quiz.validate()?;
        Ok(quiz)
    }
}

fn default_options(kind: QuestionKind) -> Option<Vec<String>> {
    let options: &[&str] = match kind {
        QuestionKind::MultipleChoice => &["Option A", "Option B", "Option C", "Option D"],
        QuestionKind::TrueFalse => &["True", "False"],
        QuestionKind::ShortAnswer | QuestionKind::Coding => return None,
    };
    Some(options.iter().map(|o| o.to_string()).collect())
}

fn default_answer(kind: QuestionKind) -> Answer {
    if kind.is_choice() {
        Answer::Choice(0)
    } else {
        Answer::Text(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_question_defaults() {
        let mut draft = QuizDraft::new();
        let mc = draft.add_question(QuestionKind::MultipleChoice).clone();
        let tf = draft.add_question(QuestionKind::TrueFalse).clone();
        let sa = draft.add_question(QuestionKind::ShortAnswer).clone();

        assert_eq!(mc.prompt, "Enter your multiple choice question here...");
        assert_eq!(mc.option_count(), 4);
        assert_eq!(mc.correct_answer, Some(Answer::Choice(0)));
        assert_eq!(tf.options, Some(vec!["True".to_string(), "False".to_string()]));
        assert_eq!(sa.options, None);
        assert_eq!(sa.correct_answer, Some(Answer::Text(String::new())));
        assert_eq!(sa.difficulty, Difficulty::Medium);
        assert_ne!(mc.id, tf.id);
        assert_eq!(draft.total_points(), 3);
    }

    #[test]
    fn test_edit_and_remove() {
        let mut draft = QuizDraft::new();
        let id = draft.add_question(QuestionKind::Coding).id.clone();
        draft.question_mut(&id).unwrap().points = 5;
        assert_eq!(draft.total_points(), 5);

        assert!(draft.remove_question(&id).is_some());
        assert!(draft.remove_question(&id).is_none());
        assert!(draft.questions().is_empty());
    }

    #[test]
    fn test_suggestions_fill_prompt_and_difficulty() {
        let mut draft = QuizDraft::new();
        for suggestion in suggestions() {
            draft.add_suggestion(suggestion);
        }
        let prompts: Vec<_> = draft.questions().iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts[0], "What is the capital of France?");
        assert_eq!(draft.questions()[2].difficulty, Difficulty::Hard);
        assert_eq!(draft.questions()[2].kind, QuestionKind::Coding);
    }

    #[test]
    fn test_build_validates() {
        let mut draft = QuizDraft::new();
        draft.add_question(QuestionKind::MultipleChoice);
        assert_eq!(draft.build(Utc::now()), Err(ValidationError::EmptyTitle));

        draft.title = "  Basics ".to_string();
        let quiz = draft.build(Utc::now()).unwrap();
        assert_eq!(quiz.title, "Basics");
        assert_eq!(quiz.time_limit, 30);

        let id = draft.questions()[0].id.clone();
        draft.question_mut(&id).unwrap().correct_answer = Some(Answer::Choice(9));
        assert!(matches!(
            draft.build(Utc::now()),
            Err(ValidationError::CorrectAnswerOutOfBounds { index: 9, len: 4, .. })
        ));
    }
}
