//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{OPTION_COUNT, QuestionError, QuestionId, ReportError};

/// Errors emitted while loading and validating a question bank.
///
/// Any variant aborts the whole load; there is no partial bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read question file {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetching questions failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("question document is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("question document has no \"questions\" array")]
    MissingQuestionsArray,

    #[error("question {id} has no valid question text")]
    InvalidQuestionText { id: QuestionId },

    #[error("question {id} must have exactly {expected} options, found {found}", expected = OPTION_COUNT)]
    InvalidOptionCount { id: QuestionId, found: usize },

    #[error("question {id} option {index} is empty")]
    EmptyOptionText { id: QuestionId, index: usize },

    #[error("question {id} correct answer {} is not an option index in 0..{}", display_answer(.found), OPTION_COUNT)]
    InvalidCorrectAnswer { id: QuestionId, found: Option<i64> },

    #[error("question id {id} appears more than once")]
    DuplicateId { id: QuestionId },

    #[error("question {id} failed validation")]
    Validation {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },
}

fn display_answer(found: &Option<i64>) -> String {
    found.map_or_else(|| "(missing)".to_string(), |value| value.to_string())
}

/// Errors emitted by the quiz service and session state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question bank is not loaded yet")]
    BankNotLoaded,

    #[error("question bank is empty")]
    EmptyBank,

    #[error("selection produced no questions")]
    EmptySelection,

    #[error("no questions in session")]
    Empty,

    #[error("session already completed")]
    Completed,

    #[error("option {index} is out of range for the current question")]
    OptionOutOfRange { index: usize },

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
