use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Category, QuestionDraft};

/// Reasons an import file cannot be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} must contain at least one question", .0.display())]
    Empty(PathBuf),

    #[error("question {} in {}: {reason}", .index + 1, .path.display())]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

/// One entry of an import file.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    category: String,
    question: String,
    options: [String; 4],
    correct_answer: String,
}

/// Read and validate every question in a JSON import file.
pub fn load_questions_from_json<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<(Category, QuestionDraft)>, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_questions(path, &content)
}

fn parse_questions(path: &Path, content: &str) -> Result<Vec<(Category, QuestionDraft)>, LoadError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if records.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let options = record.options.each_ref().map(String::as_str);
            record
                .category
                .parse::<Category>()
                .and_then(|category| {
                    QuestionDraft::from_fields(&record.question, options, &record.correct_answer)
                        .map(|draft| (category, draft))
                })
                .map_err(|e| LoadError::InvalidRecord {
                    path: path.to_path_buf(),
                    index,
                    reason: e.to_string(),
                })
        })
        .collect()
}
