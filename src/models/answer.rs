use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Submitted answers keyed by question id.
pub type Answers = BTreeMap<String, Answer>;

/// A single answer value.
///
/// Choice-type questions hold an option index, text-type questions hold the
/// typed text. Stored untagged so the persisted form is a bare JSON number or
/// string. A question's reference answer uses the same type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Index into the question's options.
    Choice(usize),
    /// Free text.
    Text(String),
}

impl Answer {
    pub fn as_choice(&self) -> Option<usize> {
        match self {
            Answer::Choice(index) => Some(*index),
            Answer::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            Answer::Choice(_) => None,
        }
    }
}

impl From<usize> for Answer {
    fn from(index: usize) -> Self {
        Answer::Choice(index)
    }
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self {
        Answer::Text(text.to_string())
    }
}

impl From<String> for Answer {
    fn from(text: String) -> Self {
        Answer::Text(text)
    }
}
