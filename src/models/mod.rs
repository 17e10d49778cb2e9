mod category;
mod question;

pub use category::{Category, storage_key};
pub use question::{Choice, Question, QuestionDraft};

/// Which screen the terminal app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    SelectCategories,
    Quiz,
    Result,
}
