//! # quizdesk
//!
//! Timed quizzes in the terminal, with results kept in a local catalog.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizdesk::{QuizDesk, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let desk = QuizDesk::open(&Settings::default());
//!     desk.run(None).await
//! }
//! ```
//!
//! Grading and storage can be used without the terminal UI:
//!
//! ```rust
//! use quizdesk::{scoring, Catalog, CatalogStore, MemoryStorage};
//!
//! let store = Catalog::new(MemoryStorage::new());
//! assert!(store.load_quizzes().is_empty());
//! assert_eq!(scoring::percentage(2, 5), 40);
//! ```

mod app;
pub mod builder;
mod config;
mod data;
mod models;
pub mod scoring;
pub mod session;
pub mod summary;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tracing::info;

pub use app::{App, AppState};
pub use config::{Settings, DEFAULT_DATA_DIR};
pub use data::{
    load_quizzes_from_path, Catalog, CatalogStore, FileStorage, LoadError, MemoryStorage, Storage,
    StorageError, StoreError, QUIZ_RESULTS_KEY, SAVED_QUIZZES_KEY,
};
pub use models::{
    average_difficulty, Answer, Answers, AttemptResult, Difficulty, Question, QuestionKind, Quiz,
    ValidationError,
};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load quizzes: {0}")]
    Load(#[from] LoadError),

    #[error("Catalog error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid quiz: {0}")]
    Validation(#[from] ValidationError),

    #[error("No quiz with id {0:?}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The terminal quiz taker over the on-disk catalog.
pub struct QuizDesk {
    app: App<Catalog<FileStorage>>,
}

impl QuizDesk {
    pub fn open(settings: &Settings) -> Self {
        let store = Catalog::new(FileStorage::new(settings.data_dir()));
        Self {
            app: App::new(store),
        }
    }

    /// Run the UI until the user quits, optionally starting `quiz_id` right
    /// away. Must be called inside a tokio runtime.
    pub async fn run(mut self, quiz_id: Option<&str>) -> Result<(), QuizError> {
        if let Some(id) = quiz_id {
            if !self.app.start_quiz_by_id(id) {
                return Err(QuizError::NotFound(id.to_string()));
            }
        }

        let mut tui = terminal::Tui::enter()?;
        info!("terminal ui started");
        let result = run_event_loop(&mut tui, &mut self.app).await;
        drop(tui);
        info!("terminal ui closed");
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App<Catalog<FileStorage>> {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App<Catalog<FileStorage>> {
        &mut self.app
    }
}

async fn run_event_loop<S: CatalogStore>(
    tui: &mut terminal::Tui,
    app: &mut App<S>,
) -> Result<(), QuizError> {
    loop {
        app.poll_timer()?;
        tui.draw(|frame| ui::render(frame, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(app, key)? {
                    break;
                }
            }
        } else {
            // Let the countdown task run between polls.
            tokio::task::yield_now().await;
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
pub fn handle_input<S: CatalogStore>(app: &mut App<S>, key: KeyEvent) -> Result<bool, StoreError> {
    match app.state {
        AppState::QuizList => Ok(handle_list_input(app, key.code)),
        AppState::Taking => handle_quiz_input(app, key).map(|()| false),
        AppState::Results | AppState::History => Ok(handle_review_input(app, key.code)),
    }
}

fn handle_list_input<S: CatalogStore>(app: &mut App<S>, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_quiz();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_quiz();
            false
        }
        KeyCode::Enter => {
            app.start_selected_quiz();
            false
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.show_history();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.refresh();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_quiz_input<S: CatalogStore>(app: &mut App<S>, key: KeyEvent) -> Result<(), StoreError> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S')) {
            app.submit()?;
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => app.abandon(),
        KeyCode::Left => app.previous_question(),
        KeyCode::Right => app.next_question(),
        code if app.current_is_choice() => match code {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => app.choose_selected_option(),
            _ => {}
        },
        KeyCode::Char(c) => app.type_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.newline(),
        _ => {}
    }

    Ok(())
}

fn handle_review_input<S: CatalogStore>(app: &mut App<S>, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
            false
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => {
            app.back_to_list();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_quiz() -> App<Catalog<MemoryStorage>> {
        let mut draft = builder::QuizDraft::new();
        draft.title = "Keys".to_string();
        draft.add_question(QuestionKind::TrueFalse);
        draft.add_question(QuestionKind::ShortAnswer).correct_answer = Some("ok".into());

        let mut store = Catalog::new(MemoryStorage::new());
        store.save_quiz(draft.build(Utc::now()).unwrap()).unwrap();
        App::new(store)
    }

    #[tokio::test]
    async fn test_keyboard_flow() {
        let mut app = app_with_quiz();

        assert!(!handle_input(&mut app, press(KeyCode::Enter)).unwrap());
        assert_eq!(app.state, AppState::Taking);

        // True/false question: pick "True", which the builder marks correct.
        handle_input(&mut app, press(KeyCode::Enter)).unwrap();
        handle_input(&mut app, press(KeyCode::Right)).unwrap();

        // Letters are typed on text questions, not treated as navigation.
        for c in "ok!".chars() {
            handle_input(&mut app, press(KeyCode::Char(c))).unwrap();
        }
        handle_input(&mut app, press(KeyCode::Backspace)).unwrap();

        let submit = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        handle_input(&mut app, submit).unwrap();
        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.session().unwrap().grade().unwrap().score, 100);

        handle_input(&mut app, press(KeyCode::Char('b'))).unwrap();
        assert_eq!(app.state, AppState::QuizList);
        assert!(handle_input(&mut app, press(KeyCode::Char('q'))).unwrap());
    }

    #[tokio::test]
    async fn test_escape_leaves_attempt() {
        let mut app = app_with_quiz();
        handle_input(&mut app, press(KeyCode::Enter)).unwrap();
        handle_input(&mut app, press(KeyCode::Esc)).unwrap();
        assert_eq!(app.state, AppState::QuizList);
        assert!(app.results().is_empty());
    }
}
