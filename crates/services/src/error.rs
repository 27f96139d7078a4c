//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `BestScoreService::save`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BestScoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode best score: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by `QuizController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted while reading settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {var} value: {raw} (expected a positive number of milliseconds)")]
    InvalidTickInterval { var: &'static str, raw: String },
    #[error("{var} cannot be blank")]
    BlankDbUrl { var: &'static str },
}

/// Errors emitted while bootstrapping quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
