//! Scoring rules shared by per-question checks and end-of-quiz grading.
//!
//! One point per correct answer. No partial credit, no time bonus and no
//! penalty for wrong answers.

use serde::Serialize;

use crate::model::Question;

/// Outcome of grading a single answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionVerdict {
    pub selected: usize,
    pub answer_index: usize,
    pub correct: bool,
}

/// Aggregate counters for a set of graded questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub answered: u32,
    pub correct: u32,
    pub score: u32,
}

impl Tally {
    /// Fold one graded question into the counters.
    pub fn record(&mut self, verdict: &QuestionVerdict) {
        self.answered = self.answered.saturating_add(1);
        if verdict.correct {
            self.correct = self.correct.saturating_add(1);
            self.score = self.correct;
        }
    }
}

/// Grade one question against a selection. Returns `None` when unanswered.
#[must_use]
pub fn grade_question(question: &Question, selection: Option<usize>) -> Option<QuestionVerdict> {
    selection.map(|selected| QuestionVerdict {
        selected,
        answer_index: question.answer_index(),
        correct: question.is_correct(selected),
    })
}

/// Grade every question against its selection.
///
/// Questions without a matching selection entry count as unanswered.
#[must_use]
pub fn grade(order: &[Question], selections: &[Option<usize>]) -> Tally {
    let mut tally = Tally::default();
    for (index, question) in order.iter().enumerate() {
        let selection = selections.get(index).copied().flatten();
        if let Some(verdict) = grade_question(question, selection) {
            tally.record(&verdict);
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    fn question(answer: usize) -> Question {
        QuestionDraft::new("Q", ["a", "b", "c"], answer)
            .validate()
            .unwrap()
    }

    #[test]
    fn unanswered_question_has_no_verdict() {
        assert_eq!(grade_question(&question(0), None), None);
    }

    #[test]
    fn option_zero_is_an_answer() {
        let verdict = grade_question(&question(0), Some(0)).unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.selected, 0);
    }

    #[test]
    fn grade_counts_answered_and_correct() {
        let order = vec![question(0), question(1), question(2), question(0)];
        let selections = vec![Some(0), Some(2), None, Some(0)];

        let tally = grade(&order, &selections);

        assert_eq!(
            tally,
            Tally {
                answered: 3,
                correct: 2,
                score: 2
            }
        );
    }

    #[test]
    fn short_selection_list_counts_as_unanswered() {
        let order = vec![question(0), question(1)];
        let tally = grade(&order, &[Some(0)]);
        assert_eq!(tally.answered, 1);
        assert_eq!(tally.correct, 1);
    }

    #[test]
    fn wrong_answers_carry_no_penalty() {
        let order = vec![question(0), question(0)];
        let tally = grade(&order, &[Some(1), Some(2)]);
        assert_eq!(tally.answered, 2);
        assert_eq!(tally.score, 0);
    }
}
