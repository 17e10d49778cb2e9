use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::QuizError;
use crate::models::{AppState, Category, Choice, Question};
use crate::session::{AnswerOutcome, FinalScore, QuizSession, SessionState};
use crate::store::QuestionStore;

const NUM_OPTIONS: usize = 4;

/// Result of the last answer, shown until the pause runs out.
#[derive(Debug, Clone, Copy)]
pub struct Feedback {
    pub choice: Choice,
    pub outcome: AnswerOutcome,
    pub answered_at: Instant,
}

pub struct App {
    pub state: AppState,
    store: QuestionStore,
    session: QuizSession,
    selection: BTreeSet<Category>,
    category_cursor: usize,
    counts: Vec<usize>,
    selected_option: usize,
    feedback: Option<Feedback>,
    feedback_delay: Duration,
    notice: Option<String>,
    result_scroll: usize,
}

impl App {
    pub fn new(store: QuestionStore, feedback_delay: Duration) -> Self {
        let mut app = Self {
            state: AppState::Welcome,
            store,
            session: QuizSession::new(),
            selection: BTreeSet::new(),
            category_cursor: 0,
            counts: vec![0; Category::ALL.len()],
            selected_option: 0,
            feedback: None,
            feedback_delay,
            notice: None,
            result_scroll: 0,
        };
        app.refresh_counts();
        app
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    // Category selection

    pub fn open_category_selection(&mut self) {
        self.session.abandon();
        self.notice = None;
        self.category_cursor = 0;
        self.refresh_counts();
        self.state = AppState::SelectCategories;
    }

    /// Each category with its question count and whether it is ticked.
    pub fn category_rows(&self) -> impl Iterator<Item = (Category, usize, bool)> + '_ {
        Category::ALL
            .into_iter()
            .zip(self.counts.iter().copied())
            .map(|(category, count)| (category, count, self.selection.contains(&category)))
    }

    /// Questions across every course, as of the last refresh.
    pub fn bank_size(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn category_cursor(&self) -> usize {
        self.category_cursor
    }

    pub fn select_next_category(&mut self) {
        self.category_cursor = (self.category_cursor + 1) % Category::ALL.len();
    }

    pub fn select_previous_category(&mut self) {
        let len = Category::ALL.len();
        self.category_cursor = (self.category_cursor + len - 1) % len;
    }

    pub fn toggle_category(&mut self) {
        let category = Category::ALL[self.category_cursor];
        if !self.selection.remove(&category) {
            self.selection.insert(category);
        }
        self.notice = None;
    }

    pub fn start_quiz(&mut self) {
        match self.session.start(&self.store, &self.selection) {
            Ok(()) => {
                self.notice = None;
                self.selected_option = 0;
                self.feedback = None;
                self.state = AppState::Quiz;
            }
            Err(QuizError::Validation(_)) => {
                self.notice = Some("Please select at least one course.".to_string());
            }
            Err(QuizError::NoQuestionsAvailable) => {
                self.notice = Some("No questions available in the selected courses.".to_string());
            }
            Err(e) => self.report(e),
        }
    }

    // Quiz

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question().ok()
    }

    pub fn current_question_number(&self) -> usize {
        self.session.position() + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session.total()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn select_next_option(&mut self) {
        if self.feedback.is_none() {
            self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
        }
    }

    pub fn select_previous_option(&mut self) {
        if self.feedback.is_none() {
            self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
        }
    }

    /// Answer with the highlighted option.
    pub fn submit_answer(&mut self) {
        if let Some(choice) = Choice::from_index(self.selected_option) {
            self.answer(choice);
        }
    }

    /// Answer with a specific option. Ignored while feedback is showing.
    pub fn answer(&mut self, choice: Choice) {
        if self.feedback.is_some() {
            return;
        }
        self.selected_option = choice.index();
        match self.session.submit_answer(choice) {
            Ok(outcome) => {
                self.feedback = Some(Feedback {
                    choice,
                    outcome,
                    answered_at: Instant::now(),
                });
            }
            Err(e) => self.report(e),
        }
    }

    /// Move on once the feedback pause has elapsed.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        let elapsed = self
            .feedback
            .is_some_and(|f| now.saturating_duration_since(f.answered_at) >= self.feedback_delay);
        if elapsed {
            self.next_question();
        }
    }

    /// Skip the rest of the feedback pause.
    pub fn continue_quiz(&mut self) {
        if self.feedback.is_some() {
            self.next_question();
        }
    }

    fn next_question(&mut self) {
        self.feedback = None;
        self.selected_option = 0;
        match self.session.advance() {
            Ok(SessionState::Finished) => {
                self.result_scroll = 0;
                self.state = AppState::Result;
            }
            Ok(_) => {}
            Err(e) => self.report(e),
        }
    }

    // Results

    pub fn final_score(&self) -> Option<FinalScore> {
        self.session.final_score().ok()
    }

    pub fn answers(&self) -> impl Iterator<Item = (&Question, Option<Choice>)> {
        self.session.answers()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.session.total() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Abandon whatever is in progress and show the main menu.
    pub fn back_to_menu(&mut self) {
        self.session.abandon();
        self.feedback = None;
        self.selected_option = 0;
        self.notice = None;
        self.refresh_counts();
        self.state = AppState::Welcome;
    }

    fn refresh_counts(&mut self) {
        let counts: Result<Vec<_>, _> = Category::ALL
            .into_iter()
            .map(|category| self.store.count(category))
            .collect();
        match counts {
            Ok(counts) => self.counts = counts,
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: QuizError) {
        warn!(%error, "action failed");
        self.notice = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::QuestionDraft;

    fn app_with(questions: &[(Category, &str, Choice)]) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = QuestionStore::open(dir.path().join("quiz.db")).unwrap();
        for (category, prompt, correct) in questions {
            let draft = QuestionDraft::from_fields(prompt, ["w", "x", "y", "z"], correct.letter()).unwrap();
            store.add_question(*category, &draft).unwrap();
        }
        (dir, App::new(store, Duration::ZERO))
    }

    fn tick_now(app: &mut App) {
        app.tick_at(Instant::now() + Duration::from_millis(1));
    }

    #[test]
    fn selection_shows_counts() {
        let (_dir, mut app) = app_with(&[
            (Category::BusinessLaw, "a", Choice::A),
            (Category::BusinessLaw, "b", Choice::B),
        ]);
        app.open_category_selection();

        let rows: Vec<_> = app.category_rows().collect();
        assert_eq!(rows[1], (Category::BusinessLaw, 2, false));
        assert_eq!(rows[0].1, 0);
    }

    #[test]
    fn welcome_counts_are_loaded_up_front() {
        let (_dir, app) = app_with(&[
            (Category::BusinessLaw, "a", Choice::A),
            (Category::DatabaseManagement, "b", Choice::B),
        ]);
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.bank_size(), 2);
    }

    #[test]
    fn starting_without_selection_shows_notice() {
        let (_dir, mut app) = app_with(&[(Category::BusinessLaw, "a", Choice::A)]);
        app.open_category_selection();
        app.start_quiz();

        assert_eq!(app.state, AppState::SelectCategories);
        assert_eq!(app.notice(), Some("Please select at least one course."));
    }

    #[test]
    fn empty_pool_shows_notice() {
        let (_dir, mut app) = app_with(&[(Category::BusinessLaw, "a", Choice::A)]);
        app.open_category_selection();
        app.toggle_category(); // Computer Applications has no questions
        app.start_quiz();

        assert_eq!(app.state, AppState::SelectCategories);
        assert_eq!(app.notice(), Some("No questions available in the selected courses."));
    }

    #[test]
    fn toggling_twice_deselects() {
        let (_dir, mut app) = app_with(&[]);
        app.open_category_selection();
        app.select_previous_category();
        app.toggle_category();
        assert!(app.category_rows().any(|(c, _, on)| c == Category::BusinessAnalytics && on));
        app.toggle_category();
        assert!(app.category_rows().all(|(_, _, on)| !on));
    }

    #[test]
    fn full_run_reaches_results() {
        let (_dir, mut app) = app_with(&[
            (Category::BusinessLaw, "one", Choice::A),
            (Category::BusinessLaw, "two", Choice::A),
        ]);
        app.open_category_selection();
        app.select_next_category();
        app.toggle_category();
        app.start_quiz();
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.total_questions(), 2);

        app.answer(Choice::A);
        let feedback = app.feedback().copied().unwrap();
        assert!(feedback.outcome.correct);

        // Answers during the pause are ignored.
        app.answer(Choice::B);
        assert_eq!(app.feedback().unwrap().choice, Choice::A);

        tick_now(&mut app);
        assert!(app.feedback().is_none());
        assert_eq!(app.current_question_number(), 2);

        app.select_next_option();
        app.submit_answer();
        assert!(!app.feedback().unwrap().outcome.correct);
        tick_now(&mut app);

        assert_eq!(app.state, AppState::Result);
        let score = app.final_score().unwrap();
        assert_eq!((score.score, score.total), (1, 2));
        assert_eq!(score.percentage, 50.0);
    }

    #[test]
    fn feedback_waits_for_delay() {
        let (_dir, mut app) = app_with(&[(Category::BusinessLaw, "one", Choice::A)]);
        app.feedback_delay = Duration::from_secs(60);
        app.open_category_selection();
        app.select_next_category();
        app.toggle_category();
        app.start_quiz();

        app.answer(Choice::C);
        app.tick();
        assert_eq!(app.state, AppState::Quiz);
        assert!(app.feedback().is_some());

        app.continue_quiz();
        assert_eq!(app.state, AppState::Result);
    }

    #[test]
    fn back_to_menu_discards_session() {
        let (_dir, mut app) = app_with(&[(Category::BusinessLaw, "one", Choice::A)]);
        app.open_category_selection();
        app.select_next_category();
        app.toggle_category();
        app.start_quiz();

        app.back_to_menu();
        assert_eq!(app.state, AppState::Welcome);
        assert!(app.current_question().is_none());
        assert_eq!(app.total_questions(), 0);
    }
}
