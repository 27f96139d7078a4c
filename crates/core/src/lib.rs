#![forbid(unsafe_code)]

pub mod error;
pub mod grading;
pub mod model;
pub mod session;
pub mod shuffle;
pub mod time;

pub use error::Error;
pub use grading::{QuestionVerdict, Tally};
pub use session::{CheckOutcome, QuizSession, SessionError, SessionPhase, SessionProgress};
pub use time::Clock;
