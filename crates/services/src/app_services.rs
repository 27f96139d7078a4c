use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::best_score::BestScoreService;
use crate::config::QuizSettings;
use crate::controller::QuizController;
use crate::error::{QuizError, ServicesError};

/// Assembles the storage backend and best-score store for quiz runs.
#[derive(Clone)]
pub struct QuizServices {
    settings: QuizSettings,
    clock: Clock,
    bank: QuestionBank,
    best_scores: BestScoreService,
}

impl QuizServices {
    /// Build services from settings: `SQLite` when a database URL is set,
    /// in-memory storage otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ServicesError` if the database cannot be opened or migrated.
    pub async fn from_settings(
        settings: QuizSettings,
        clock: Clock,
        bank: QuestionBank,
    ) -> Result<Self, ServicesError> {
        let storage = match settings.db_url.as_deref() {
            Some(url) => {
                info!(db_url = url, "using sqlite storage");
                Storage::sqlite(url).await?
            }
            None => {
                info!("using in-memory storage");
                Storage::in_memory()
            }
        };
        Ok(Self::with_storage(settings, clock, bank, &storage))
    }

    /// Build services from environment settings and the built-in bank.
    ///
    /// # Errors
    ///
    /// Returns `ServicesError` for invalid settings or storage failures.
    pub async fn from_env(clock: Clock) -> Result<Self, ServicesError> {
        let settings = QuizSettings::from_env()?;
        Self::from_settings(settings, clock, QuestionBank::builtin()).await
    }

    #[must_use]
    pub fn with_storage(
        settings: QuizSettings,
        clock: Clock,
        bank: QuestionBank,
        storage: &Storage,
    ) -> Self {
        let best_scores = BestScoreService::new(Arc::clone(&storage.values))
            .with_key(settings.best_score_key.clone());
        Self {
            settings,
            clock,
            bank,
            best_scores,
        }
    }

    /// Start a new quiz over the configured bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the session cannot start.
    pub async fn start_quiz(&self) -> Result<QuizController, QuizError> {
        QuizController::start(
            self.bank.clone(),
            self.best_scores.clone(),
            self.clock,
            self.settings.tick_interval,
        )
        .await
    }

    /// Start a new quiz with a reproducible question order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the session cannot start.
    pub async fn start_quiz_seeded(&self, seed: u64) -> Result<QuizController, QuizError> {
        QuizController::start_seeded(
            self.bank.clone(),
            self.best_scores.clone(),
            self.clock,
            self.settings.tick_interval,
            seed,
        )
        .await
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn best_scores(&self) -> &BestScoreService {
        &self.best_scores
    }
}
