use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::grading::{Tally, grade_question};
use crate::model::Question;
use crate::time::format_elapsed;

/// How a question ended up at the end of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReviewOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// One question as shown on the review screen after finishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry {
    /// 1-based position in session order.
    pub number: usize,
    pub text: String,
    pub options: Vec<String>,
    pub answer_index: usize,
    pub selected: Option<usize>,
    pub outcome: ReviewOutcome,
    pub explanation: Option<String>,
}

/// Final result of a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    score: u32,
    total: u32,
    correct: u32,
    answered: u32,
    percent: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    review: Vec<ReviewEntry>,
}

impl QuizSummary {
    /// Assemble a summary from the bulk-graded tally of a session.
    pub(crate) fn build(
        order: &[Question],
        selections: &[Option<usize>],
        tally: Tally,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let total = u32::try_from(order.len()).unwrap_or(u32::MAX);
        let review = order
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = selections.get(index).copied().flatten();
                let outcome = match grade_question(question, selected) {
                    Some(verdict) if verdict.correct => ReviewOutcome::Correct,
                    Some(_) => ReviewOutcome::Incorrect,
                    None => ReviewOutcome::Unanswered,
                };
                ReviewEntry {
                    number: index + 1,
                    text: question.text().to_owned(),
                    options: question.options().to_vec(),
                    answer_index: question.answer_index(),
                    selected,
                    outcome,
                    explanation: question.explanation().map(ToOwned::to_owned),
                }
            })
            .collect();

        Self {
            score: tally.score,
            total,
            correct: tally.correct,
            answered: tally.answered,
            percent: rounded_percent(tally.score, total),
            started_at,
            finished_at: finished_at.max(started_at),
            review,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Score as a whole percentage of the total, halves rounded up.
    #[must_use]
    pub fn percent(&self) -> u32 {
        self.percent
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.finished_at - self.started_at
    }

    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed())
    }

    #[must_use]
    pub fn review(&self) -> &[ReviewEntry] {
        &self.review
    }

    /// One-line result shown when the quiz ends.
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "You scored {}/{} ({}%). Time: {}. Correct answers: {}.",
            self.score,
            self.total,
            self.percent,
            self.elapsed_display(),
            self.correct
        )
    }
}

fn rounded_percent(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total);
    let percent = (score * 200 + total) / (total * 2);
    u32::try_from(percent).unwrap_or(u32::MAX)
}
