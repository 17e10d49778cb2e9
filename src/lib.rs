//! # quiz-bowl
//!
//! A multiple-choice quiz over a SQLite question bank split by course.
//!
//! The library side is two pieces: [`QuestionStore`], which keeps the
//! questions of each [`Category`] in its own table, and [`QuizSession`],
//! which samples up to ten of them and scores a run. A terminal front end is
//! available through [`QuizBowl`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::collections::BTreeSet;
//!
//! use quiz_bowl::{Category, Choice, QuestionStore, QuizError, QuizSession, SessionState};
//!
//! fn main() -> Result<(), QuizError> {
//!     let store = QuestionStore::open("quiz_bowl.db")?;
//!
//!     let mut session = QuizSession::new();
//!     session.start(&store, &BTreeSet::from([Category::BusinessLaw]))?;
//!
//!     while session.state() == SessionState::InProgress {
//!         let outcome = session.submit_answer(Choice::A)?;
//!         println!("correct: {}", outcome.correct);
//!         session.advance()?;
//!     }
//!
//!     let score = session.final_score()?;
//!     println!("{}/{} ({:.1}%)", score.score, score.total, score.percentage);
//!     Ok(())
//! }
//! ```

mod admin;
mod app;
mod config;
mod data;
mod error;
mod models;
mod session;
mod store;
pub mod terminal;
mod ui;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use admin::{ADMIN_SECRET, Admin, AdminGate};
pub use app::App;
pub use config::{Config, DEFAULT_FEEDBACK_DELAY};
pub use data::{LoadError, load_questions_from_json};
pub use error::{QuizError, Result};
pub use models::{AppState, Category, Choice, Question, QuestionDraft, storage_key};
pub use session::{AnswerOutcome, FinalScore, MAX_QUESTIONS, QuizSession, SessionState, sample};
pub use store::{DEFAULT_DB_PATH, QuestionStore};

/// How often the event loop wakes up without input.
const TICK_RATE: Duration = Duration::from_millis(100);

/// The quiz running in the terminal.
pub struct QuizBowl {
    app: App,
}

impl QuizBowl {
    pub fn new(store: QuestionStore, config: &Config) -> Self {
        Self {
            app: App::new(store, config.feedback_delay),
        }
    }

    /// Open the configured store and build the UI around it.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.open_store()?, config))
    }

    /// Take over the terminal until the player quits.
    pub fn run(mut self) -> Result<()> {
        let mut guard = terminal::TerminalGuard::new()?;
        run_event_loop(guard.terminal(), &mut self.app)
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_input(app, key.code) {
                    break;
                }
            }
        }

        app.tick();
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::SelectCategories => handle_select_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.open_category_selection();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_select_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_category(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_category(),
        KeyCode::Char(' ') => app.toggle_category(),
        KeyCode::Enter => app.start_quiz(),
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.feedback().is_some() {
                app.continue_quiz();
            } else {
                app.submit_answer();
            }
        }
        KeyCode::Char(c @ ('a'..='d' | 'A'..='D')) => {
            if let Ok(choice) = c.to_string().parse::<Choice>() {
                app.answer(choice);
            }
        }
        KeyCode::Esc => app.back_to_menu(),
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
