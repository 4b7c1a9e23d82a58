mod ids;
mod question;
mod report;

pub use ids::{ParseIdError, QuestionId};
pub use question::{
    DEFAULT_EXPLANATION, OPTION_COUNT, Question, QuestionDraft, QuestionError, ValidatedQuestion,
};
pub use report::{AnswerReview, PASS_THRESHOLD_PERCENT, ReportError, SessionReport};
