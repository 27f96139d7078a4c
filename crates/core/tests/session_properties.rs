use quiz_core::grading::grade;
use quiz_core::model::{QuestionBank, QuestionDraft};
use quiz_core::time::fixed_now;
use quiz_core::{CheckOutcome, QuizSession, SessionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn ten_question_bank() -> QuestionBank {
    let drafts = (0..10).map(|id| {
        QuestionDraft::new(format!("Question {id}"), ["a", "b", "c", "d"], id % 4)
    });
    QuestionBank::from_drafts(drafts).unwrap()
}

#[test]
fn order_is_a_permutation_of_the_bank() {
    let bank = ten_question_bank();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let session = QuizSession::start(&bank, &mut rng, fixed_now()).unwrap();

        assert_eq!(session.total(), bank.len());
        let mut seen: Vec<_> = session.order().iter().map(|q| q.text().to_owned()).collect();
        let mut expected: Vec<_> = bank.questions().iter().map(|q| q.text().to_owned()).collect();
        seen.sort();
        expected.sort();
        assert_eq!(seen, expected);
    }
}

#[test]
fn incremental_and_bulk_grading_agree_after_finish() {
    let bank = ten_question_bank();

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = QuizSession::start(&bank, &mut rng, fixed_now()).unwrap();

        for _ in 0..rng.random_range(0..40) {
            match rng.random_range(0..4) {
                0 => {
                    session.select(Some(rng.random_range(0..5)));
                }
                1 => {
                    session.select(None);
                }
                2 => {
                    let _ = session.check();
                }
                _ => {
                    session.advance();
                }
            }
        }

        let summary = session.finish(fixed_now()).clone();
        let expected = grade(session.order(), session.selections());

        assert_eq!(session.tally(), expected, "seed {seed}");
        assert_eq!(summary.answered(), expected.answered);
        assert_eq!(summary.correct(), expected.correct);
        assert_eq!(summary.score(), expected.score);
        for (index, selection) in session.selections().iter().enumerate() {
            if let Some(option) = selection {
                assert!(session.order()[index].has_option(*option));
            }
        }
    }
}

#[test]
fn all_correct_with_checks_scores_ten() {
    let bank = ten_question_bank();
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = QuizSession::start(&bank, &mut rng, fixed_now()).unwrap();

    loop {
        let answer = session.current_question().answer_index();
        assert!(session.select(Some(answer)));
        assert!(matches!(session.check(), Ok(CheckOutcome::Graded(v)) if v.correct));
        if !session.advance() {
            break;
        }
    }
    assert_eq!(session.score(), 10);

    let summary = session.finish(fixed_now());
    assert_eq!(summary.score(), 10);
    assert_eq!(summary.answered(), 10);
    assert_eq!(summary.correct(), 10);
    assert_eq!(summary.percent(), 100);
}

#[test]
fn finishing_without_checks_grades_every_selection() {
    let bank = ten_question_bank();
    let mut rng = StdRng::seed_from_u64(9);
    let mut session = QuizSession::start(&bank, &mut rng, fixed_now()).unwrap();

    // One correct answer, then two wrong ones, never checked.
    let answer = session.current_question().answer_index();
    session.select(Some(answer));
    for _ in 0..2 {
        session.advance();
        let wrong = (session.current_question().answer_index() + 1) % 4;
        session.select(Some(wrong));
    }

    let summary = session.finish(fixed_now());
    assert_eq!(summary.answered(), 3);
    assert_eq!(summary.correct(), 1);
    assert_eq!(summary.score(), 1);
}

#[test]
fn check_requires_a_selection_on_each_question() {
    let bank = ten_question_bank();
    let mut rng = StdRng::seed_from_u64(2);
    let mut session = QuizSession::start(&bank, &mut rng, fixed_now()).unwrap();

    session.select(Some(0));
    session.check().unwrap();
    session.advance();

    assert_eq!(session.check(), Err(SessionError::SelectionRequired));
    assert_eq!(session.answered_count(), 1);
}
