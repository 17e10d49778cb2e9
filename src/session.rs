//! Quiz session state machine.
//!
//! `SelectingCategories -> InProgress -> Finished`. A session samples at most
//! [`MAX_QUESTIONS`] questions from the selected categories and walks through
//! them one at a time; each question takes exactly one answer and the caller
//! advances explicitly.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::{QuizError, Result};
use crate::models::{Category, Choice, Question};
use crate::store::QuestionStore;

/// Upper bound on questions per quiz.
pub const MAX_QUESTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SelectingCategories,
    InProgress,
    Finished,
}

impl SessionState {
    fn label(self) -> &'static str {
        match self {
            SessionState::SelectingCategories => "selecting categories",
            SessionState::InProgress => "in progress",
            SessionState::Finished => "finished",
        }
    }
}

/// What the player learns after answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_choice: Choice,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalScore {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
}

impl FinalScore {
    fn new(score: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            100.0 * score as f64 / total as f64
        } else {
            0.0
        };
        Self {
            score,
            total,
            percentage,
        }
    }
}

/// One player's run through a sampled quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    state: SessionState,
    categories: BTreeSet<Category>,
    questions: Vec<Question>,
    answers: Vec<Option<Choice>>,
    position: usize,
    score: usize,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::SelectingCategories,
            categories: BTreeSet::new(),
            questions: Vec::new(),
            answers: Vec::new(),
            position: 0,
            score: 0,
        }
    }

    /// Sample a quiz from the selected categories and begin it.
    pub fn start(&mut self, store: &QuestionStore, categories: &BTreeSet<Category>) -> Result<()> {
        self.start_with_rng(store, categories, &mut rand::thread_rng())
    }

    /// Like [`start`](Self::start) with a caller-supplied RNG.
    pub fn start_with_rng<R>(
        &mut self,
        store: &QuestionStore,
        categories: &BTreeSet<Category>,
        rng: &mut R,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        self.expect_state(SessionState::SelectingCategories, "start a quiz")?;
        if categories.is_empty() {
            return Err(QuizError::validation("select at least one category"));
        }

        let pool = store.pool(categories.iter().copied())?;
        let questions = sample(pool, rng);
        if questions.is_empty() {
            return Err(QuizError::NoQuestionsAvailable);
        }

        debug!(?categories, count = questions.len(), "quiz started");
        self.categories = categories.clone();
        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.position = 0;
        self.score = 0;
        self.state = SessionState::InProgress;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Zero-based index of the question being asked.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current_question(&self) -> Result<&Question> {
        self.expect_state(SessionState::InProgress, "show a question")?;
        Ok(&self.questions[self.position])
    }

    /// Whether the current question already has an answer.
    pub fn is_answered(&self) -> bool {
        self.state == SessionState::InProgress && self.answers[self.position].is_some()
    }

    pub fn submit_answer(&mut self, choice: Choice) -> Result<AnswerOutcome> {
        self.expect_state(SessionState::InProgress, "answer")?;
        if self.answers[self.position].is_some() {
            return Err(QuizError::AlreadyAnswered {
                position: self.position,
            });
        }

        let question = &self.questions[self.position];
        let outcome = AnswerOutcome {
            correct: question.is_correct(choice),
            correct_choice: question.correct,
        };
        self.answers[self.position] = Some(choice);
        if outcome.correct {
            self.score += 1;
        }
        debug!(position = self.position, %choice, correct = outcome.correct, "answer submitted");
        Ok(outcome)
    }

    /// Move past an answered question. Returns the state after moving.
    pub fn advance(&mut self) -> Result<SessionState> {
        self.expect_state(SessionState::InProgress, "advance")?;
        if self.answers[self.position].is_none() {
            return Err(QuizError::InvalidState {
                operation: "advance",
                state: "waiting for an answer",
            });
        }

        self.position += 1;
        if self.position >= self.questions.len() {
            self.state = SessionState::Finished;
            debug!(score = self.score, total = self.questions.len(), "quiz finished");
        }
        Ok(self.state)
    }

    pub fn final_score(&self) -> Result<FinalScore> {
        self.expect_state(SessionState::Finished, "show the final score")?;
        Ok(FinalScore::new(self.score, self.questions.len()))
    }

    /// Each sampled question with the answer given, if any.
    pub fn answers(&self) -> impl Iterator<Item = (&Question, Option<Choice>)> {
        self.questions.iter().zip(self.answers.iter().copied())
    }

    /// Drop all progress and go back to category selection.
    pub fn abandon(&mut self) {
        if self.state == SessionState::InProgress {
            debug!(position = self.position, "quiz abandoned");
        }
        *self = Self::new();
    }

    fn expect_state(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidState {
                operation,
                state: self.state.label(),
            })
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop repeated questions, shuffle, keep at most [`MAX_QUESTIONS`].
pub fn sample<R>(pool: Vec<Question>, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut questions: Vec<_> = pool.into_iter().filter(|q| seen.insert(q.key())).collect();
    questions.shuffle(rng);
    questions.truncate(MAX_QUESTIONS);
    questions
}
