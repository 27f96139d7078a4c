use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::fmt;
use thiserror::Error;

use crate::grading::{self, QuestionVerdict, Tally};
use crate::model::{Question, QuestionBank, QuizSummary};
use crate::shuffle::shuffled;
use crate::time::Clock;

//
// ─── ERRORS AND OUTCOMES ───────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    EmptyBank,

    #[error("select an option before checking")]
    SelectionRequired,
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress { checked_current: bool },
    Finished,
}

/// Result of a `check` call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The current question was graded and its answer may be revealed.
    Graded(QuestionVerdict),
    /// Already checked, or the session is finished. Nothing changed.
    Ignored,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    /// Questions with a stored selection, checked or not. Compare
    /// `QuizSession::answered_count`, which counts checked questions.
    pub selected: usize,
    pub is_last: bool,
    pub is_finished: bool,
    /// Share of the quiz passed so far, in `[0, 1]`.
    pub fraction: f64,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One playthrough of a shuffled question bank.
///
/// Counters are kept up to date incrementally by `check`, and recomputed from
/// the full selection list by `finish`. The recomputed values are final.
pub struct QuizSession {
    order: Vec<Question>,
    current: usize,
    selections: Vec<Option<usize>>,
    phase: SessionPhase,
    tally: Tally,
    started_at: DateTime<Utc>,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    /// Start a session over a freshly shuffled copy of `bank`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn start<R: Rng + ?Sized>(
        bank: &QuestionBank,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        Self::from_order(shuffled(bank.questions(), rng), started_at)
    }

    /// Start a session that presents questions in exactly the given order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if `order` is empty.
    pub fn from_order(order: Vec<Question>, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if order.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        Ok(Self {
            selections: vec![None; order.len()],
            order,
            current: 0,
            phase: SessionPhase::InProgress {
                checked_current: false,
            },
            tally: Tally::default(),
            started_at,
            summary: None,
        })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Record the option chosen for the current question, replacing any earlier choice.
    ///
    /// `None` stands for a cleared selection and leaves the stored one alone.
    /// Returns false if nothing was recorded (cleared, out of range, or finished).
    pub fn select(&mut self, option: Option<usize>) -> bool {
        if self.is_finished() {
            return false;
        }
        let Some(option) = option else {
            return false;
        };
        if !self.order[self.current].has_option(option) {
            return false;
        }

        self.selections[self.current] = Some(option);
        true
    }

    /// Grade the current question and reveal its answer.
    ///
    /// A second call for the same question, or any call after finishing, is
    /// ignored so counters are never applied twice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SelectionRequired` if no option is selected yet.
    pub fn check(&mut self) -> Result<CheckOutcome, SessionError> {
        if !matches!(
            self.phase,
            SessionPhase::InProgress {
                checked_current: false
            }
        ) {
            return Ok(CheckOutcome::Ignored);
        }

        let question = &self.order[self.current];
        let Some(verdict) = grading::grade_question(question, self.selections[self.current])
        else {
            return Err(SessionError::SelectionRequired);
        };

        self.tally.record(&verdict);
        self.phase = SessionPhase::InProgress {
            checked_current: true,
        };
        Ok(CheckOutcome::Graded(verdict))
    }

    /// Move to the next question. Returns false on the last question or after finishing.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() || self.is_last() {
            return false;
        }

        self.current += 1;
        self.phase = SessionPhase::InProgress {
            checked_current: false,
        };
        true
    }

    /// End the session and grade every question from its stored selection.
    ///
    /// Questions that were never checked, or never visited, are graded too.
    /// Calling this again returns the summary from the first call.
    pub fn finish(&mut self, finished_at: DateTime<Utc>) -> &QuizSummary {
        self.summary.get_or_insert_with(|| {
            let tally = grading::grade(&self.order, &self.selections);
            self.tally = tally;
            self.phase = SessionPhase::Finished;
            QuizSummary::build(
                &self.order,
                &self.selections,
                tally,
                self.started_at,
                finished_at,
            )
        })
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// True once the current question has been graded and revealed.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::InProgress {
                checked_current: true
            }
        )
    }

    #[must_use]
    pub fn order(&self) -> &[Question] {
        &self.order
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.order[self.current]
    }

    /// Selection to show for the current question, restored after navigation.
    #[must_use]
    pub fn current_selection(&self) -> Option<usize> {
        self.selections[self.current]
    }

    #[must_use]
    pub fn selections(&self) -> &[Option<usize>] {
        &self.selections
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.order.len()
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.tally.score
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.tally.answered
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.tally.correct
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    /// Time spent so far, frozen once the session is finished.
    #[must_use]
    pub fn elapsed(&self, clock: &Clock) -> Duration {
        match &self.summary {
            Some(summary) => summary.elapsed(),
            None => clock.elapsed_since(self.started_at),
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.order.len();
        let is_finished = self.is_finished();
        #[allow(clippy::cast_precision_loss)]
        let fraction = if is_finished {
            1.0
        } else {
            self.current as f64 / total as f64
        };

        SessionProgress {
            position: self.current + 1,
            total,
            selected: self.selections.iter().filter(|s| s.is_some()).count(),
            is_last: self.is_last(),
            is_finished,
            fraction,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.order.len())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("tally", &self.tally)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
