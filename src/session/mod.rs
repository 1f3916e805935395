//! Taking a quiz: the countdown, its timer task, and the attempt itself.

mod attempt;
mod countdown;
mod ticker;

pub use attempt::AttemptSession;
pub use countdown::{Countdown, CountdownState, TickOutcome};
pub use ticker::Ticker;
