use thiserror::Error;

use crate::model::{QuestionError, ReportError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    QuestionValidation(#[from] QuestionError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
