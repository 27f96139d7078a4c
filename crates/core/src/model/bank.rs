use thiserror::Error;

use super::question::{Question, QuestionDraft, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank cannot be empty")]
    Empty,

    #[error("invalid question at position {index}: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Fixed, read-only list of every question a session can draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from already validated questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Empty` if no questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        Ok(Self { questions })
    }

    /// Validate every draft and build a bank from them.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::InvalidQuestion` for the first draft that fails
    /// validation, or `QuestionBankError::Empty` if there are none.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> Result<Self, QuestionBankError> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| QuestionBankError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// The ten JavaScript fundamentals questions shipped with the widget.
    #[must_use]
    pub fn builtin() -> Self {
        let questions = builtin_drafts()
            .into_iter()
            .filter_map(|draft| draft.validate().ok())
            .collect();
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank has no questions. A constructed bank never does.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn builtin_drafts() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft::new(
            "Which method adds a new element to the end of an array?",
            ["push()", "pop()", "shift()", "unshift()"],
            0,
        )
        .with_explanation(
            "push() appends to the end; pop() removes from end; shift()/unshift() work at the start.",
        ),
        QuestionDraft::new(
            "What does '===' check in JavaScript?",
            ["Value only", "Type only", "Value and type", "Reference only"],
            2,
        )
        .with_explanation("Strict equality compares both value and type without coercion."),
        QuestionDraft::new(
            "Which DOM API selects the first match for a CSS selector?",
            [
                "getElementById",
                "querySelector",
                "querySelectorAll",
                "getElementsByClassName",
            ],
            1,
        ),
        QuestionDraft::new(
            "What is the default value of an uninitialized variable declared with 'let'?",
            ["null", "undefined", "0", "'' (empty string)"],
            1,
        ),
        QuestionDraft::new(
            "Which function converts a JSON string into an object?",
            ["JSON.stringify", "JSON.parse", "Object.fromJSON", "toJSON"],
            1,
        ),
        QuestionDraft::new(
            "Which statement is true about const in JS?",
            [
                "Variables cannot ever change",
                "The binding can't be reassigned",
                "It freezes the object",
                "It's block-scoped and hoisted as initialized",
            ],
            1,
        )
        .with_explanation(
            "const prevents rebinding, but object contents can still change; it's block-scoped.",
        ),
        QuestionDraft::new(
            "How do you schedule code to run after a delay?",
            [
                "setTimeout",
                "setInterval",
                "requestAnimationFrame",
                "Promise.resolve",
            ],
            0,
        ),
        QuestionDraft::new(
            "Which method returns a new array with elements that pass a test?",
            ["map", "filter", "reduce", "forEach"],
            1,
        ),
        QuestionDraft::new(
            "What does localStorage store values as?",
            ["Numbers", "Strings", "Objects", "Any type"],
            1,
        )
        .with_explanation(
            "Web Storage stores key/value pairs as strings; we serialize for structured data.",
        ),
        QuestionDraft::new(
            "Which event is best for handling form submission?",
            ["click", "submit", "change", "input"],
            1,
        ),
    ]
}
