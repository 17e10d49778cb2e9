//! Error types shared by the store, the quiz session and the admin gate.

use std::io;

use thiserror::Error;

use crate::data::LoadError;
use crate::models::Category;

/// Crate-wide result alias.
pub type Result<T, E = QuizError> = std::result::Result<T, E>;

/// Errors surfaced to the caller for display.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Malformed input: an empty field, an invalid option letter, an empty
    /// category selection.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Text that does not name one of the fixed categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// No question with this id in the category.
    #[error("question {id} not found in {category}")]
    NotFound { category: Category, id: i64 },

    /// The selected categories hold no questions at all.
    #[error("no questions available in the selected categories")]
    NoQuestionsAvailable,

    /// A session operation was called in a state that does not allow it.
    #[error("cannot {operation} while the quiz is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The question at this position already has an answer.
    #[error("question {} has already been answered", .position + 1)]
    AlreadyAnswered { position: usize },

    /// Wrong admin secret.
    #[error("incorrect admin password")]
    AccessDenied,

    /// The underlying database failed.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An import file could not be used.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Question data could not be serialized for output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal or filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl QuizError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        QuizError::Validation(message.into())
    }

    /// Returns `true` for errors caused by user input rather than the
    /// environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuizError::Validation(_)
                | QuizError::UnknownCategory(_)
                | QuizError::NotFound { .. }
                | QuizError::NoQuestionsAvailable
                | QuizError::AccessDenied
        )
    }
}
