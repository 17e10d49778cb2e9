//! Runtime settings, filled in from command-line flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::store::{DEFAULT_DB_PATH, QuestionStore};

/// How long answer feedback stays on screen before the next question.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file holding the question bank.
    pub db_path: PathBuf,
    /// Where to write logs; `None` means stderr outside the terminal UI.
    pub log_file: Option<PathBuf>,
    pub feedback_delay: Duration,
}

impl Config {
    pub fn open_store(&self) -> Result<QuestionStore> {
        QuestionStore::open(&self.db_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_file: None,
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }
}
