use serde::{Deserialize, Serialize};

use super::answer::Answer;
use super::error::ValidationError;

/// How a question is answered and graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    ShortAnswer,
    Coding,
    TrueFalse,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::MultipleChoice,
        QuestionKind::ShortAnswer,
        QuestionKind::Coding,
        QuestionKind::TrueFalse,
    ];

    /// Wire name, e.g. `multiple-choice`.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::ShortAnswer => "short-answer",
            QuestionKind::Coding => "coding",
            QuestionKind::TrueFalse => "true-false",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::ShortAnswer => "Short Answer",
            QuestionKind::Coding => "Coding Exercise",
            QuestionKind::TrueFalse => "True/False",
        }
    }

    /// Whether answers are an option index rather than typed text.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::TrueFalse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Weight used when averaging the difficulty of a question set.
    pub fn weight(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
    pub points: u32,
}

impl Question {
    /// The option text at `index`, if this question has options.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|options| options.get(index))
            .map(String::as_str)
    }

    pub fn option_count(&self) -> usize {
        self.options.as_ref().map_or(0, Vec::len)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.points == 0 {
            return Err(ValidationError::ZeroPoints(self.id.clone()));
        }

        if self.kind.is_choice() {
            if let (Some(options), Some(Answer::Choice(index))) =
                (&self.options, &self.correct_answer)
            {
                if *index >= options.len() {
                    return Err(ValidationError::CorrectAnswerOutOfBounds {
                        question_id: self.id.clone(),
                        index: *index,
                        len: options.len(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_question(correct: usize) -> Question {
        Question {
            id: "q1".to_string(),
            kind: QuestionKind::MultipleChoice,
            prompt: "Pick one".to_string(),
            options: Some(vec!["a".into(), "b".into(), "c".into()]),
            correct_answer: Some(Answer::Choice(correct)),
            explanation: None,
            difficulty: Difficulty::Easy,
            points: 1,
        }
    }

    #[test]
    fn test_correct_index_must_be_in_bounds() {
        assert!(choice_question(2).validate().is_ok());
        assert_eq!(
            choice_question(3).validate(),
            Err(ValidationError::CorrectAnswerOutOfBounds {
                question_id: "q1".to_string(),
                index: 3,
                len: 3,
            })
        );
    }

    #[test]
    fn test_zero_points_rejected() {
        let mut question = choice_question(0);
        question.points = 0;
        assert_eq!(
            question.validate(),
            Err(ValidationError::ZeroPoints("q1".to_string()))
        );
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": "q7",
            "type": "true-false",
            "question": "Rust has a garbage collector",
            "options": ["True", "False"],
            "correctAnswer": 1,
            "difficulty": "easy",
            "points": 2
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind, QuestionKind::TrueFalse);
        assert_eq!(question.correct_answer, Some(Answer::Choice(1)));
        assert_eq!(question.option(1), Some("False"));
        assert!(question.explanation.is_none());

        let back = serde_json::to_value(&question).unwrap();
        assert_eq!(back["type"], "true-false");
        assert_eq!(back["correctAnswer"], 1);
        assert!(back.get("explanation").is_none());
    }
}
