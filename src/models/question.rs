use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::models::Category;

/// One of the four answer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn letter(self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for Choice {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Choice::A),
            "B" => Ok(Choice::B),
            "C" => Ok(Choice::C),
            "D" => Ok(Choice::D),
            _ => Err(QuizError::validation(format!(
                "correct answer must be A, B, C, or D (got {:?})",
                s
            ))),
        }
    }
}

impl ToSql for Choice {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.letter()))
    }
}

impl FromSql for Choice {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: QuizError| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub category: Category,
    pub prompt: String,
    pub options: [String; 4],
    pub correct: Choice,
}

impl Question {
    pub fn option(&self, choice: Choice) -> &str {
        &self.options[choice.index()]
    }

    pub fn is_correct(&self, choice: Choice) -> bool {
        self.correct == choice
    }

    /// Identity across the whole bank. Ids are only unique per table.
    pub fn key(&self) -> (Category, i64) {
        (self.category, self.id)
    }
}

/// The editable fields of a question, used for both add and full replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: [String; 4],
    pub correct: Choice,
}

impl QuestionDraft {
    pub fn new(prompt: impl Into<String>, options: [String; 4], correct: Choice) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct,
        }
    }

    /// Build a draft from raw form input: fields are trimmed and the
    /// correct letter is parsed case-insensitively.
    pub fn from_fields(prompt: &str, options: [&str; 4], correct: &str) -> Result<Self> {
        let draft = Self {
            prompt: prompt.trim().to_string(),
            options: options.map(|o| o.trim().to_string()),
            correct: correct.parse()?,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// All text fields must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(QuizError::validation("question text must not be empty"));
        }
        for (choice, option) in Choice::ALL.iter().zip(&self.options) {
            if option.trim().is_empty() {
                return Err(QuizError::validation(format!(
                    "option {} must not be empty",
                    choice
                )));
            }
        }
        Ok(())
    }

    pub fn into_question(self, category: Category, id: i64) -> Question {
        Question {
            id,
            category,
            prompt: self.prompt,
            options: self.options,
            correct: self.correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_parses_case_insensitively() {
        assert_eq!("a".parse::<Choice>().unwrap(), Choice::A);
        assert_eq!(" D ".parse::<Choice>().unwrap(), Choice::D);
        assert!(matches!("E".parse::<Choice>(), Err(QuizError::Validation(_))));
        assert!("AB".parse::<Choice>().is_err());
        assert!("".parse::<Choice>().is_err());
    }

    #[test]
    fn choice_index_matches_option_slot() {
        for (i, choice) in Choice::ALL.into_iter().enumerate() {
            assert_eq!(choice.index(), i);
            assert_eq!(Choice::from_index(i), Some(choice));
        }
        assert_eq!(Choice::from_index(4), None);
    }

    #[test]
    fn from_fields_trims_input() {
        let draft = QuestionDraft::from_fields(" What? ", [" a", "b ", "c", "d"], "b").unwrap();
        assert_eq!(draft.prompt, "What?");
        assert_eq!(draft.options[0], "a");
        assert_eq!(draft.options[1], "b");
        assert_eq!(draft.correct, Choice::B);
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let err = QuestionDraft::from_fields("", ["a", "b", "c", "d"], "A").unwrap_err();
        assert!(matches!(err, QuizError::Validation(_)));
    }

    #[test]
    fn blank_option_is_rejected() {
        let err = QuestionDraft::from_fields("Q", ["a", "   ", "c", "d"], "A").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: option B must not be empty");
    }

    #[test]
    fn question_option_lookup() {
        let question = QuestionDraft::from_fields("Q", ["w", "x", "y", "z"], "C")
            .unwrap()
            .into_question(Category::BusinessLaw, 3);
        assert_eq!(question.option(Choice::C), "y");
        assert!(question.is_correct(Choice::C));
        assert!(!question.is_correct(Choice::A));
        assert_eq!(question.key(), (Category::BusinessLaw, 3));
    }
}
