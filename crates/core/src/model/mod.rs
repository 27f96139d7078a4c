mod bank;
mod question;
mod summary;

pub use bank::{QuestionBank, QuestionBankError};
pub use question::{Question, QuestionDraft, QuestionError};
pub use summary::{QuizSummary, ReviewEntry, ReviewOutcome};
