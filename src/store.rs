//! SQLite-backed question bank.
//!
//! Each category owns one table named by [`Category::table`]. A connection is
//! opened for every operation and dropped when it returns, so every mutation
//! is committed before the call completes.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::error::{QuizError, Result};
use crate::models::{Category, Question, QuestionDraft};

/// Database file used when none is configured.
pub const DEFAULT_DB_PATH: &str = "quiz_bowl.db";

const COLUMNS: &str = "id, question, option_a, option_b, option_c, option_d, correct_answer";

/// Persistent mapping from category to its questions.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    /// Open the store at `path`, creating the file and any missing tables.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.init()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The fixed category list.
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Create one table per category if it does not exist yet.
    pub fn init(&self) -> Result<()> {
        let conn = self.connect()?;
        for category in Category::ALL {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    question TEXT NOT NULL,
                    option_a TEXT NOT NULL,
                    option_b TEXT NOT NULL,
                    option_c TEXT NOT NULL,
                    option_d TEXT NOT NULL,
                    correct_answer TEXT NOT NULL CHECK(correct_answer IN ('A', 'B', 'C', 'D'))
                );",
                category.table()
            ))?;
        }
        debug!(path = %self.path.display(), "question tables ready");
        Ok(())
    }

    pub fn add_question(&self, category: Category, draft: &QuestionDraft) -> Result<i64> {
        draft.validate()?;
        let conn = self.connect()?;
        let id = insert(&conn, category, draft)?;
        info!(%category, id, "question added");
        Ok(id)
    }

    /// Insert several drafts atomically. Every draft is validated before
    /// anything is written.
    pub fn import(&self, category: Category, drafts: &[QuestionDraft]) -> Result<Vec<i64>> {
        for draft in drafts {
            draft.validate()?;
        }
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let ids = drafts
            .iter()
            .map(|draft| insert(&tx, category, draft))
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;
        info!(%category, count = ids.len(), "questions imported");
        Ok(ids)
    }

    /// Insert drafts spread over several categories in one transaction.
    /// Either every pair is written or none is.
    pub fn import_all(&self, questions: &[(Category, QuestionDraft)]) -> Result<Vec<(Category, i64)>> {
        for (_, draft) in questions {
            draft.validate()?;
        }
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let keys = questions
            .iter()
            .map(|(category, draft)| Ok((*category, insert(&tx, *category, draft)?)))
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;
        info!(count = keys.len(), "questions imported");
        Ok(keys)
    }

    /// All questions of one category, oldest first.
    pub fn questions(&self, category: Category) -> Result<Vec<Question>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY id ASC",
            COLUMNS,
            category.table()
        ))?;
        let questions = stmt
            .query_map([], |row| row_to_question(category, row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(%category, count = questions.len(), "questions loaded");
        Ok(questions)
    }

    pub fn question(&self, category: Category, id: i64) -> Result<Question> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, category.table()),
            params![id],
            |row| row_to_question(category, row),
        )
        .optional()?
        .ok_or(QuizError::NotFound { category, id })
    }

    /// Replace every editable field of an existing question.
    pub fn update_question(&self, category: Category, id: i64, draft: &QuestionDraft) -> Result<()> {
        draft.validate()?;
        let conn = self.connect()?;
        let changed = conn.execute(
            &format!(
                "UPDATE {} SET question = ?1, option_a = ?2, option_b = ?3, option_c = ?4,
                 option_d = ?5, correct_answer = ?6 WHERE id = ?7",
                category.table()
            ),
            params![
                draft.prompt,
                draft.options[0],
                draft.options[1],
                draft.options[2],
                draft.options[3],
                draft.correct,
                id
            ],
        )?;
        if changed == 0 {
            return Err(QuizError::NotFound { category, id });
        }
        info!(%category, id, "question updated");
        Ok(())
    }

    /// Remove a question. Returns `false` if there was nothing to remove;
    /// deleting an absent id is not an error.
    pub fn delete_question(&self, category: Category, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", category.table()),
            params![id],
        )?;
        if changed > 0 {
            info!(%category, id, "question deleted");
        } else {
            debug!(%category, id, "delete of absent question ignored");
        }
        Ok(changed > 0)
    }

    pub fn count(&self, category: Category) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", category.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Questions of every given category, concatenated in the order given.
    pub fn pool<I>(&self, categories: I) -> Result<Vec<Question>>
    where
        I: IntoIterator<Item = Category>,
    {
        let mut pool = Vec::new();
        for category in categories {
            pool.extend(self.questions(category)?);
        }
        Ok(pool)
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}

fn insert(conn: &Connection, category: Category, draft: &QuestionDraft) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} (question, option_a, option_b, option_c, option_d, correct_answer)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            category.table()
        ),
        params![
            draft.prompt,
            draft.options[0],
            draft.options[1],
            draft.options[2],
            draft.options[3],
            draft.correct
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_question(category: Category, row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        category,
        prompt: row.get(1)?,
        options: [row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?],
        correct: row.get(6)?,
    })
}
