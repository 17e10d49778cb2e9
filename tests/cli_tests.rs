//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSWORD: &str = "jimmyjenkins";

fn quiz_bowl(db: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quiz-bowl").unwrap();
    cmd.env_remove("QUIZ_BOWL_PASSWORD")
        .env_remove("QUIZ_BOWL_LOG")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db);
    cmd
}

fn demo_questions() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/questions.json")
}

fn add_law_question(db: &Path, question: &str, correct: &str) {
    quiz_bowl(db)
        .args(["add", "--password", PASSWORD, "--category", "Business Law"])
        .args(["--question", question])
        .args(["-a", "one", "-b", "two", "-c", "three", "-d", "four"])
        .args(["--correct", correct])
        .assert()
        .success()
        .stdout(predicate::str::contains("added to Business Law"));
}

#[test]
fn init_creates_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");

    quiz_bowl(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tables ready"));
    assert!(db.exists());
}

#[test]
fn categories_lists_all_five() {
    let dir = TempDir::new().unwrap();
    quiz_bowl(&dir.path().join("quiz.db"))
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Computer Applications"))
        .stdout(predicate::str::contains("business_law"))
        .stdout(predicate::str::contains("Business Analytics"));
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");
    add_law_question(&db, "What is a tort?", "b");

    quiz_bowl(&db)
        .args(["list", "--category", "business_law"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] What is a tort?"))
        .stdout(predicate::str::contains("correct: B"));
}

#[test]
fn list_json_is_parseable() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");
    add_law_question(&db, "Q?", "A");

    let output = quiz_bowl(&db)
        .args(["list", "--category", "Business Law", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["prompt"], "Q?");
    assert_eq!(json[0]["category"], "business_law");
    assert_eq!(json[0]["correct"], "A");
}

#[test]
fn wrong_password_is_rejected() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");

    quiz_bowl(&db)
        .args(["add", "--password", "nope", "--category", "Business Law"])
        .args(["--question", "Q", "-a", "1", "-b", "2", "-c", "3", "-d", "4", "--correct", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incorrect admin password"));
    assert!(!db.exists());

    quiz_bowl(&db)
        .args(["list", "--category", "Business Law"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No questions"));
}

#[test]
fn rejected_admin_commands_create_no_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");

    quiz_bowl(&db)
        .args(["delete", "--password", "nope", "--category", "Business Law", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incorrect admin password"));
    quiz_bowl(&db)
        .args(["import", "--password", "nope"])
        .arg(demo_questions())
        .assert()
        .failure()
        .stderr(predicate::str::contains("incorrect admin password"));
    assert!(!db.exists());
}

#[test]
fn empty_question_fails_validation() {
    let dir = TempDir::new().unwrap();
    quiz_bowl(&dir.path().join("quiz.db"))
        .args(["add", "--password", PASSWORD, "--category", "business_law"])
        .args(["--question", "", "-a", "a", "-b", "b", "-c", "c", "-d", "d", "--correct", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question text must not be empty"));
}

#[test]
fn bad_correct_letter_fails_validation() {
    let dir = TempDir::new().unwrap();
    quiz_bowl(&dir.path().join("quiz.db"))
        .args(["add", "--password", PASSWORD, "--category", "business_law"])
        .args(["--question", "Q", "-a", "a", "-b", "b", "-c", "c", "-d", "d", "--correct", "E"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be A, B, C, or D"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    quiz_bowl(&dir.path().join("quiz.db"))
        .args(["list", "--category", "Basket Weaving"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category: Basket Weaving"));
}

#[test]
fn edit_replaces_question() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");
    add_law_question(&db, "Old?", "A");

    quiz_bowl(&db)
        .args(["edit", "--password", PASSWORD, "--id", "1", "--category", "Business Law"])
        .args(["--question", "New?", "-a", "w", "-b", "x", "-c", "y", "-d", "z", "--correct", "d"])
        .assert()
        .success();

    quiz_bowl(&db)
        .args(["list", "--category", "Business Law"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] New?"))
        .stdout(predicate::str::contains("Old?").not())
        .stdout(predicate::str::contains("correct: D"));
}

#[test]
fn edit_missing_question_fails() {
    let dir = TempDir::new().unwrap();
    quiz_bowl(&dir.path().join("quiz.db"))
        .args(["edit", "--password", PASSWORD, "--id", "42", "--category", "Business Law"])
        .args(["--question", "Q", "-a", "w", "-b", "x", "-c", "y", "-d", "z", "--correct", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question 42 not found in Business Law"));
}

#[test]
fn delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");
    add_law_question(&db, "Gone soon", "A");

    quiz_bowl(&db)
        .args(["delete", "--password", PASSWORD, "--category", "Business Law", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    quiz_bowl(&db)
        .args(["delete", "--password", PASSWORD, "--category", "Business Law", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));
}

#[test]
fn import_demo_questions() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");

    quiz_bowl(&db)
        .arg("import")
        .arg(demo_questions())
        .env("QUIZ_BOWL_PASSWORD", PASSWORD)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 6 questions"));

    quiz_bowl(&db)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions"));
}

#[test]
fn import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    quiz_bowl(&dir.path().join("quiz.db"))
        .args(["import", "--password", PASSWORD])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
