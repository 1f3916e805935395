use tracing::{debug, info};

use crate::data::{CatalogStore, StoreError};
use crate::models::{Answer, AttemptResult, QuestionKind, Quiz};
use crate::session::AttemptSession;
use crate::summary::CatalogStats;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    QuizList,
    Taking,
    Results,
    History,
}

pub struct App<S> {
    pub state: AppState,
    store: S,
    quizzes: Vec<Quiz>,
    results: Vec<AttemptResult>,
    selected_quiz: usize,
    selected_option: usize,
    session: Option<AttemptSession>,
    scroll: usize,
}

impl<S: CatalogStore> App<S> {
    pub fn new(store: S) -> Self {
        let mut app = Self {
            state: AppState::QuizList,
            store,
            quizzes: Vec::new(),
            results: Vec::new(),
            selected_quiz: 0,
            selected_option: 0,
            session: None,
            scroll: 0,
        };
        app.refresh();
        app
    }

    /// Re-read both lists from the store.
    pub fn refresh(&mut self) {
        self.quizzes = self.store.load_quizzes();
        self.results = self.store.load_results();
        self.selected_quiz = self.selected_quiz.min(self.quizzes.len().saturating_sub(1));
        debug!(quizzes = self.quizzes.len(), results = self.results.len(), "catalog refreshed");
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn results(&self) -> &[AttemptResult] {
        &self.results
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::collect(&self.quizzes, &self.results)
    }

    pub fn selected_quiz(&self) -> usize {
        self.selected_quiz
    }

    pub fn select_next_quiz(&mut self) {
        if !self.quizzes.is_empty() {
            self.selected_quiz = (self.selected_quiz + 1) % self.quizzes.len();
        }
    }

    pub fn select_previous_quiz(&mut self) {
        if !self.quizzes.is_empty() {
            let len = self.quizzes.len();
            self.selected_quiz = (self.selected_quiz + len - 1) % len;
        }
    }

    /// Begin an attempt on the highlighted quiz. Needs a tokio runtime for
    /// the countdown.
    pub fn start_selected_quiz(&mut self) -> bool {
        match self.quizzes.get(self.selected_quiz).cloned() {
            Some(quiz) => {
                self.begin(quiz);
                true
            }
            None => false,
        }
    }

    pub fn start_quiz_by_id(&mut self, id: &str) -> bool {
        match self.quizzes.iter().position(|q| q.id == id) {
            Some(index) => {
                self.selected_quiz = index;
                self.start_selected_quiz()
            }
            None => false,
        }
    }

    fn begin(&mut self, quiz: Quiz) {
        info!(quiz_id = %quiz.id, questions = quiz.questions.len(), "starting attempt");
        let mut session = AttemptSession::new(quiz);
        session.start_timer();
        self.session = Some(session);
        self.selected_option = 0;
        self.scroll = 0;
        self.state = AppState::Taking;
    }

    pub fn session(&self) -> Option<&AttemptSession> {
        self.session.as_ref()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    fn current_option_count(&self) -> usize {
        self.session
            .as_ref()
            .and_then(AttemptSession::current_question)
            .map_or(0, |q| q.option_count())
    }

    fn current_kind(&self) -> Option<QuestionKind> {
        self.session
            .as_ref()
            .and_then(AttemptSession::current_question)
            .map(|q| q.kind)
    }

    pub fn current_is_choice(&self) -> bool {
        self.current_kind().is_some_and(|kind| kind.is_choice())
    }

    pub fn select_next_option(&mut self) {
        let count = self.current_option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.current_option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    pub fn choose_selected_option(&mut self) {
        if !self.current_is_choice() {
            return;
        }
        let choice = self.selected_option;
        if let Some(session) = self.session.as_mut() {
            session.answer_current(Answer::Choice(choice));
        }
    }

    pub fn type_char(&mut self, c: char) {
        if self.current_is_choice() {
            return;
        }
        if let Some(text) = self.session.as_mut().and_then(AttemptSession::current_text_mut) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.current_is_choice() {
            return;
        }
        if let Some(text) = self.session.as_mut().and_then(AttemptSession::current_text_mut) {
            text.pop();
        }
    }

    /// Line breaks are only kept for code answers.
    pub fn newline(&mut self) {
        if self.current_kind() == Some(QuestionKind::Coding) {
            self.type_char('\n');
        }
    }

    pub fn next_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.next_question();
        }
        self.sync_selected_option();
    }

    pub fn previous_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.previous_question();
        }
        self.sync_selected_option();
    }

    /// Put the cursor on the option already chosen for this question.
    fn sync_selected_option(&mut self) {
        self.selected_option = self
            .session
            .as_ref()
            .and_then(|session| {
                let question = session.current_question()?;
                session.answer_for(&question.id)?.as_choice()
            })
            .unwrap_or(0);
    }

    pub fn submit(&mut self) -> Result<(), StoreError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.submit(&mut self.store)?.is_some() {
            self.show_results();
        }
        Ok(())
    }

    /// Apply countdown ticks; switches to the results screen on timeout.
    pub fn poll_timer(&mut self) -> Result<(), StoreError> {
        if self.state != AppState::Taking {
            return Ok(());
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.poll_timer(&mut self.store)?.is_some() {
            self.show_results();
        }
        Ok(())
    }

    fn show_results(&mut self) {
        self.results = self.store.load_results();
        self.scroll = 0;
        self.state = AppState::Results;
    }

    /// Leave an attempt without recording anything.
    pub fn abandon(&mut self) {
        if let Some(session) = self.session.take() {
            info!(quiz_id = %session.quiz().id, "attempt abandoned");
        }
        self.state = AppState::QuizList;
    }

    pub fn back_to_list(&mut self) {
        self.session = None;
        self.scroll = 0;
        self.refresh();
        self.state = AppState::QuizList;
    }

    pub fn show_history(&mut self) {
        self.results = self.store.load_results();
        self.scroll = 0;
        self.state = AppState::History;
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_down(&mut self) {
        let rows = match self.state {
            AppState::Results => self.session.as_ref().map_or(0, |s| s.quiz().questions.len()),
            AppState::History => self.results.len(),
            _ => 0,
        };
        self.scroll = (self.scroll + 1).min(rows.saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
