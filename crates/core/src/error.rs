use thiserror::Error;

use crate::model::{QuestionBankError, QuestionError};
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] QuestionBankError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
