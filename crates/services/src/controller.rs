use std::fmt;
use std::time::Duration;

use chrono::Duration as ElapsedDuration;
use quiz_core::model::{QuestionBank, QuizSummary};
use quiz_core::time::format_elapsed;
use quiz_core::{CheckOutcome, Clock, QuizSession, SessionError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::best_score::BestScoreService;
use crate::error::QuizError;
use crate::ticker::ElapsedTicker;

/// Sole owner of the running quiz session.
///
/// The presentation layer drives the quiz only through these methods and
/// reads state back through the accessors. A reset replaces the session and
/// its elapsed-time ticker wholesale.
pub struct QuizController {
    bank: QuestionBank,
    best_scores: BestScoreService,
    clock: Clock,
    tick_interval: Duration,
    rng: StdRng,
    session: QuizSession,
    ticker: Option<ElapsedTicker>,
    best_score: u32,
}

impl QuizController {
    /// Load the best score and start a freshly shuffled session.
    ///
    /// Must be called from within a tokio runtime; the elapsed-time ticker is
    /// spawned on it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` if the session cannot start.
    pub async fn start(
        bank: QuestionBank,
        best_scores: BestScoreService,
        clock: Clock,
        tick_interval: Duration,
    ) -> Result<Self, QuizError> {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::start_with_rng(bank, best_scores, clock, tick_interval, rng).await
    }

    /// Like `start`, with a reproducible question order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` if the session cannot start.
    pub async fn start_seeded(
        bank: QuestionBank,
        best_scores: BestScoreService,
        clock: Clock,
        tick_interval: Duration,
        seed: u64,
    ) -> Result<Self, QuizError> {
        let rng = StdRng::seed_from_u64(seed);
        Self::start_with_rng(bank, best_scores, clock, tick_interval, rng).await
    }

    async fn start_with_rng(
        bank: QuestionBank,
        best_scores: BestScoreService,
        clock: Clock,
        tick_interval: Duration,
        mut rng: StdRng,
    ) -> Result<Self, QuizError> {
        let best_score = best_scores.load().await;
        let session = QuizSession::start(&bank, &mut rng, clock.now())?;
        let ticker = ElapsedTicker::spawn(clock, session.started_at(), tick_interval);
        info!(
            questions = session.total(),
            best_score, "quiz session started"
        );

        Ok(Self {
            bank,
            best_scores,
            clock,
            tick_interval,
            rng,
            session,
            ticker: Some(ticker),
            best_score,
        })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Record a choice for the current question. See `QuizSession::select`.
    pub fn select(&mut self, option: Option<usize>) -> bool {
        let recorded = self.session.select(option);
        debug!(
            index = self.session.current_index(),
            ?option,
            recorded,
            "select"
        );
        recorded
    }

    /// Grade and reveal the current question. See `QuizSession::check`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SelectionRequired` if nothing is selected yet.
    pub fn check(&mut self) -> Result<CheckOutcome, SessionError> {
        let outcome = self.session.check();
        match &outcome {
            Ok(CheckOutcome::Graded(verdict)) => debug!(
                index = self.session.current_index(),
                correct = verdict.correct,
                score = self.session.score(),
                "check"
            ),
            Ok(CheckOutcome::Ignored) => debug!(
                index = self.session.current_index(),
                "check ignored"
            ),
            Err(err) => debug!(index = self.session.current_index(), %err, "check rejected"),
        }
        outcome
    }

    /// Move to the next question. See `QuizSession::advance`.
    pub fn advance(&mut self) -> bool {
        let moved = self.session.advance();
        debug!(index = self.session.current_index(), moved, "advance");
        moved
    }

    /// Finish the quiz, stop the timer and raise the persisted best score.
    ///
    /// A failure to persist the best score is logged; the in-memory best score
    /// is still raised.
    pub async fn finish(&mut self) -> &QuizSummary {
        if !self.session.is_finished() {
            let score = self.session.finish(self.clock.now()).score();
            self.stop_ticker();

            self.best_score = match self.best_scores.save(score).await {
                Ok(best) => best,
                Err(err) => {
                    warn!(error = %err, "could not persist best score");
                    self.best_score.max(score)
                }
            };

            info!(
                score,
                total = self.session.total(),
                answered = self.session.answered_count(),
                elapsed = %self.elapsed_display(),
                best_score = self.best_score,
                "quiz session finished"
            );
        }

        self.session.finish(self.clock.now())
    }

    /// Discard the current session and start a new one.
    ///
    /// The previous ticker is stopped before the new one starts.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` if the new session cannot start.
    pub async fn reset(&mut self) -> Result<(), QuizError> {
        self.stop_ticker();
        self.ticker = None;

        self.best_score = self.best_scores.load().await;
        self.session = QuizSession::start(&self.bank, &mut self.rng, self.clock.now())?;
        self.ticker = Some(ElapsedTicker::spawn(
            self.clock,
            self.session.started_at(),
            self.tick_interval,
        ));
        info!(questions = self.session.total(), "quiz session reset");
        Ok(())
    }

    fn stop_ticker(&self) {
        if let Some(ticker) = &self.ticker {
            ticker.stop();
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.session.summary()
    }

    #[must_use]
    pub fn elapsed(&self) -> ElapsedDuration {
        self.session.elapsed(&self.clock)
    }

    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed())
    }

    /// Live elapsed-time display of the current session's ticker.
    #[must_use]
    pub fn elapsed_updates(&self) -> Option<watch::Receiver<String>> {
        self.ticker.as_ref().map(ElapsedTicker::subscribe)
    }

    #[must_use]
    pub fn ticker(&self) -> Option<&ElapsedTicker> {
        self.ticker.as_ref()
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("session", &self.session)
            .field("best_score", &self.best_score)
            .field("ticking", &self.ticker.as_ref().is_some_and(|t| !t.is_stopped()))
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
