use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;

pub const DEFAULT_DATA_DIR: &str = ".quizdesk";
const LOG_FILE: &str = "quizdesk.log";

/// Where the catalog lives and how much gets logged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_level: LevelFilter::INFO,
        }
    }
}

impl Settings {
    pub fn new<P: Into<PathBuf>>(data_dir: P, log_level: LevelFilter) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The terminal belongs to the UI, so logs go to a file next to the data.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_inside_data_dir() {
        let settings = Settings::new("/tmp/qd", LevelFilter::DEBUG);
        assert_eq!(settings.log_path(), PathBuf::from("/tmp/qd/quizdesk.log"));
        assert_eq!(Settings::default().data_dir(), Path::new(".quizdesk"));
    }
}
