use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::models::Quiz;

use super::error::LoadError;

/// A quiz file holds either one quiz or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuizFile {
    Many(Vec<Quiz>),
    One(Box<Quiz>),
}

/// Read and validate quizzes from a JSON file.
pub fn load_quizzes_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Quiz>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let quizzes = match serde_json::from_str(&json_content) {
        Ok(QuizFile::Many(quizzes)) => quizzes,
        Ok(QuizFile::One(quiz)) => vec![*quiz],
        Err(source) => {
            return Err(LoadError::Parse {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if quizzes.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    for quiz in &quizzes {
        quiz.validate().map_err(|source| LoadError::Invalid {
            title: quiz.title.clone(),
            source,
        })?;
    }

    Ok(quizzes)
}
