use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::ValidationError;

/// Raw key-value storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Storage quota exceeded writing {key:?} ({needed} of {limit} bytes)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
}

/// Catalog write failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure reading a quiz file for import.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} does not contain any quizzes")]
    Empty { path: PathBuf },

    #[error("Invalid quiz {title:?}: {source}")]
    Invalid {
        title: String,
        #[source]
        source: ValidationError,
    },
}
