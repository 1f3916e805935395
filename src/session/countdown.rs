use tracing::trace;

/// Where an attempt's countdown stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Counting down; answers are still accepted.
    Running { remaining: u32 },
    /// Grading and recording are underway.
    Submitting,
    /// Terminal.
    Submitted,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running with this many seconds left.
    Running(u32),
    /// Time ran out. The caller must submit now; this is reported once.
    Expired,
    /// Already submitting or submitted; the tick was ignored.
    Idle,
}

/// Countdown and submission guard for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    state: CountdownState,
}

impl Countdown {
    /// A zero budget starts out expired: the owner submits without waiting
    /// for a tick.
    pub fn new(seconds: u32) -> Self {
        let state = if seconds == 0 {
            CountdownState::Submitting
        } else {
            CountdownState::Running { remaining: seconds }
        };
        Self { state }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Seconds left, zero once submission has begun.
    pub fn remaining(&self) -> u32 {
        match self.state {
            CountdownState::Running { remaining } => remaining,
            _ => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    pub fn is_submitted(&self) -> bool {
        self.state == CountdownState::Submitted
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> TickOutcome {
        let CountdownState::Running { remaining } = self.state else {
            return TickOutcome::Idle;
        };

        let remaining = remaining.saturating_sub(1);
        trace!(remaining, "countdown tick");

        if remaining == 0 {
            self.state = CountdownState::Submitting;
            TickOutcome::Expired
        } else {
            self.state = CountdownState::Running { remaining };
            TickOutcome::Running(remaining)
        }
    }

    /// Manual submission. Returns `false` when submission already began.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_running() {
            self.state = CountdownState::Submitting;
            true
        } else {
            false
        }
    }

    pub fn finish_submit(&mut self) {
        self.state = CountdownState::Submitted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_down_and_expires_once() {
        let mut countdown = Countdown::new(5);
        let outcomes: Vec<_> = (0..7).map(|_| countdown.tick()).collect();

        assert_eq!(
            outcomes,
            [
                TickOutcome::Running(4),
                TickOutcome::Running(3),
                TickOutcome::Running(2),
                TickOutcome::Running(1),
                TickOutcome::Expired,
                TickOutcome::Idle,
                TickOutcome::Idle,
            ]
        );
        assert_eq!(countdown.state(), CountdownState::Submitting);

        countdown.finish_submit();
        assert!(countdown.is_submitted());
        assert_eq!(countdown.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_manual_submit_stops_ticking() {
        let mut countdown = Countdown::new(5);
        countdown.tick();
        countdown.tick();
        assert_eq!(countdown.remaining(), 3);

        assert!(countdown.begin_submit());
        assert!(!countdown.begin_submit());
        countdown.finish_submit();

        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_zero_start_is_already_expired() {
        let mut countdown = Countdown::new(0);
        assert_eq!(countdown.state(), CountdownState::Submitting);
        assert!(!countdown.is_running());
        assert!(!countdown.begin_submit());
        assert_eq!(countdown.tick(), TickOutcome::Idle);
    }
}
