use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::data::{CatalogStore, StoreError};
use crate::models::{Answer, Answers, Question, Quiz};
use crate::scoring::{self, Grade};

use super::countdown::{Countdown, CountdownState, TickOutcome};
use super::ticker::Ticker;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One person taking one quiz: answers in memory, a countdown, and at most
/// one submission.
pub struct AttemptSession {
    quiz: Quiz,
    answers: Answers,
    current: usize,
    countdown: Countdown,
    ticker: Option<Ticker>,
    grade: Option<Grade>,
    /// Started with no time on the clock and not yet recorded.
    expired_at_start: bool,
}

impl AttemptSession {
    /// Countdown starts at the quiz's time limit.
    pub fn new(quiz: Quiz) -> Self {
        let seconds = quiz.time_limit_secs();
        Self::with_countdown(quiz, seconds)
    }

    pub fn with_countdown(quiz: Quiz, seconds: u32) -> Self {
        Self {
            quiz,
            answers: Answers::new(),
            current: 0,
            countdown: Countdown::new(seconds),
            ticker: None,
            grade: None,
            expired_at_start: seconds == 0,
        }
    }

    /// Start the one-second tick. Needs a tokio runtime.
    pub fn start_timer(&mut self) {
        if self.ticker.is_none() && self.countdown.is_running() {
            debug!(quiz_id = %self.quiz.id, remaining = self.countdown.remaining(), "starting countdown");
            self.ticker = Some(Ticker::every(TICK_PERIOD));
        }
    }

    pub fn timer_active(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn state(&self) -> CountdownState {
        self.countdown.state()
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn is_submitted(&self) -> bool {
        self.countdown.is_submitted()
    }

    pub fn grade(&self) -> Option<&Grade> {
        self.grade.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.quiz.questions.len()
    }

    pub fn next_question(&mut self) {
        if !self.is_last_question() {
            self.current += 1;
        }
    }

    pub fn previous_question(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Record an answer for the current question. Ignored after submission
    /// has begun.
    pub fn answer_current(&mut self, answer: Answer) {
        if !self.countdown.is_running() {
            return;
        }
        if let Some(question) = self.quiz.questions.get(self.current) {
            self.answers.insert(question.id.clone(), answer);
        }
    }

    /// Mutable text of the current question's answer, created empty.
    pub fn current_text_mut(&mut self) -> Option<&mut String> {
        if !self.countdown.is_running() {
            return None;
        }
        let question = self.quiz.questions.get(self.current)?;
        let entry = self
            .answers
            .entry(question.id.clone())
            .or_insert_with(|| Answer::Text(String::new()));
        if let Answer::Choice(_) = entry {
            *entry = Answer::Text(String::new());
        }
        match entry {
            Answer::Text(text) => Some(text),
            Answer::Choice(_) => None,
        }
    }

    /// Apply one tick. Submits when the countdown runs out.
    pub fn tick<S>(&mut self, store: &mut S) -> Result<Option<&Grade>, StoreError>
    where
        S: CatalogStore + ?Sized,
    {
        if self.expired_at_start {
            return self.submit_expired(store).map(Some);
        }

        match self.countdown.tick() {
            TickOutcome::Expired => {
                info!(quiz_id = %self.quiz.id, "time is up, submitting");
                self.record(store).map(Some)
            }
            TickOutcome::Running(_) | TickOutcome::Idle => Ok(None),
        }
    }

    /// Apply every tick the timer delivered since the last poll. An attempt
    /// that started with no time left is submitted on the first poll.
    pub fn poll_timer<S>(&mut self, store: &mut S) -> Result<Option<&Grade>, StoreError>
    where
        S: CatalogStore + ?Sized,
    {
        if self.expired_at_start {
            return self.submit_expired(store).map(Some);
        }

        let pending = self.ticker.as_mut().map_or(0, Ticker::drain);
        for _ in 0..pending {
            if self.tick(store)?.is_some() {
                return Ok(self.grade.as_ref());
            }
        }
        Ok(None)
    }

    /// Wait for the timer's next tick and apply it. Returns `Ok(None)`
    /// immediately when no timer is running.
    pub async fn next_tick<S>(&mut self, store: &mut S) -> Result<Option<&Grade>, StoreError>
    where
        S: CatalogStore + ?Sized,
    {
        if self.expired_at_start {
            return self.submit_expired(store).map(Some);
        }

        let Some(ticker) = self.ticker.as_mut() else {
            return Ok(None);
        };
        if ticker.next().await.is_none() {
            return Ok(None);
        }
        self.tick(store)
    }

    /// Manual submission. `Ok(None)` when the attempt was already submitted.
    pub fn submit<S>(&mut self, store: &mut S) -> Result<Option<&Grade>, StoreError>
    where
        S: CatalogStore + ?Sized,
    {
        let remaining = self.countdown.remaining();
        if !self.countdown.begin_submit() {
            return Ok(None);
        }
        info!(quiz_id = %self.quiz.id, remaining, "submitting attempt");
        self.record(store).map(Some)
    }

    fn submit_expired<S>(&mut self, store: &mut S) -> Result<&Grade, StoreError>
    where
        S: CatalogStore + ?Sized,
    {
        self.expired_at_start = false;
        info!(quiz_id = %self.quiz.id, "no time on the clock, submitting");
        self.record(store)
    }

    fn record<S>(&mut self, store: &mut S) -> Result<&Grade, StoreError>
    where
        S: CatalogStore + ?Sized,
    {
        self.stop_timer();
        let grade = scoring::submit(store, &self.quiz, &self.answers, Utc::now())?;
        self.countdown.finish_submit();
        Ok(&*self.grade.insert(grade))
    }

    fn stop_timer(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}
