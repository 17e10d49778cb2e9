//! Shared-secret gate in front of the question bank's mutating operations.

use tracing::{info, warn};

use crate::error::{QuizError, Result};
use crate::models::{Category, QuestionDraft};
use crate::store::QuestionStore;

/// The one admin password.
pub const ADMIN_SECRET: &str = "jimmyjenkins";

#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Check `attempt` without touching any store.
    pub fn verify(&self, attempt: &str) -> Result<()> {
        if attempt != self.secret {
            warn!("admin login rejected");
            return Err(QuizError::AccessDenied);
        }
        Ok(())
    }

    /// Check `attempt` and hand out an editing handle on success.
    pub fn login<'a>(&self, store: &'a QuestionStore, attempt: &str) -> Result<Admin<'a>> {
        self.verify(attempt)?;
        info!("admin logged in");
        Ok(Admin { store })
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(ADMIN_SECRET)
    }
}

/// Editing access to the store, only obtainable through [`AdminGate::login`].
#[derive(Debug)]
pub struct Admin<'a> {
    store: &'a QuestionStore,
}

impl Admin<'_> {
    pub fn add_question(&self, category: Category, draft: &QuestionDraft) -> Result<i64> {
        self.store.add_question(category, draft)
    }

    pub fn update_question(&self, category: Category, id: i64, draft: &QuestionDraft) -> Result<()> {
        self.store.update_question(category, id, draft)
    }

    pub fn delete_question(&self, category: Category, id: i64) -> Result<bool> {
        self.store.delete_question(category, id)
    }

    /// Import drafts for any mix of categories. Nothing is written unless
    /// every draft is valid and every insert succeeds.
    pub fn import(&self, questions: &[(Category, QuestionDraft)]) -> Result<usize> {
        Ok(self.store.import_all(questions)?.len())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::Choice;

    fn temp_store() -> (TempDir, QuestionStore) {
        let dir = TempDir::new().unwrap();
        let store = QuestionStore::open(dir.path().join("quiz.db")).unwrap();
        (dir, store)
    }

    fn draft(prompt: &str) -> QuestionDraft {
        QuestionDraft::from_fields(prompt, ["a", "b", "c", "d"], "A").unwrap()
    }

    #[test]
    fn wrong_secret_is_denied() {
        let (_dir, store) = temp_store();
        let gate = AdminGate::default();
        assert!(matches!(gate.login(&store, "guess"), Err(QuizError::AccessDenied)));
        assert!(matches!(gate.login(&store, ""), Err(QuizError::AccessDenied)));
        assert!(matches!(gate.verify("JIMMYJENKINS"), Err(QuizError::AccessDenied)));
        assert!(gate.verify(ADMIN_SECRET).is_ok());
    }

    #[test]
    fn admin_can_edit_bank() {
        let (_dir, store) = temp_store();
        let admin = AdminGate::new("s3cret").login(&store, "s3cret").unwrap();

        let id = admin.add_question(Category::BusinessLaw, &draft("first")).unwrap();
        let mut edited = draft("edited");
        edited.correct = Choice::D;
        admin.update_question(Category::BusinessLaw, id, &edited).unwrap();
        assert_eq!(store.question(Category::BusinessLaw, id).unwrap().correct, Choice::D);

        assert!(admin.delete_question(Category::BusinessLaw, id).unwrap());
        assert!(!admin.delete_question(Category::BusinessLaw, id).unwrap());
    }

    #[test]
    fn import_groups_by_category() {
        let (_dir, store) = temp_store();
        let admin = AdminGate::default().login(&store, ADMIN_SECRET).unwrap();

        let imported = admin
            .import(&[
                (Category::BusinessLaw, draft("law")),
                (Category::BusinessAnalytics, draft("stats")),
                (Category::BusinessLaw, draft("more law")),
            ])
            .unwrap();
        assert_eq!(imported, 3);
        assert_eq!(store.count(Category::BusinessLaw).unwrap(), 2);
        assert_eq!(store.count(Category::BusinessAnalytics).unwrap(), 1);
    }

    #[test]
    fn invalid_import_writes_nothing() {
        let (_dir, store) = temp_store();
        let admin = AdminGate::default().login(&store, ADMIN_SECRET).unwrap();
        let mut bad = draft("bad");
        bad.prompt.clear();

        let result = admin.import(&[(Category::BusinessLaw, draft("ok")), (Category::BusinessAnalytics, bad)]);
        assert!(matches!(result, Err(QuizError::Validation(_))));
        assert_eq!(store.count(Category::BusinessLaw).unwrap(), 0);
    }

    #[test]
    fn failed_import_leaves_earlier_categories_untouched() {
        let (_dir, store) = temp_store();
        rusqlite::Connection::open(store.path())
            .unwrap()
            .execute_batch("DROP TABLE business_analytics")
            .unwrap();
        let admin = AdminGate::default().login(&store, ADMIN_SECRET).unwrap();

        let result = admin.import(&[
            (Category::BusinessLaw, draft("law")),
            (Category::BusinessAnalytics, draft("stats")),
        ]);
        assert!(matches!(result, Err(QuizError::Storage(_))));
        assert_eq!(store.count(Category::BusinessLaw).unwrap(), 0);
    }
}
