use quiz_core::model::{AnswerReview, SessionReport};

use crate::vm::time_fmt::format_datetime;

/// Review line for one question the user missed or skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub number: usize,
    pub question: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub explanation: String,
}

impl From<&AnswerReview> for ReviewVm {
    fn from(review: &AnswerReview) -> Self {
        Self {
            number: review.number(),
            question: review.question().to_string(),
            chosen: review.chosen().map(str::to_string),
            correct: review.correct_option().to_string(),
            explanation: review.explanation().to_string(),
        }
    }
}

/// Everything the results screen renders, pre-formatted.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportVm {
    pub correct: usize,
    pub total: usize,
    pub percentage_str: String,
    pub passed: bool,
    pub is_perfect: bool,
    pub started_at_str: String,
    pub completed_at_str: String,
    pub missed: Vec<ReviewVm>,
}

#[must_use]
pub fn map_report(report: &SessionReport) -> ReportVm {
    ReportVm {
        correct: report.correct(),
        total: report.total(),
        percentage_str: format!("{:.1}", report.percentage()),
        passed: report.passed(),
        is_perfect: report.is_perfect(),
        started_at_str: format_datetime(report.started_at()),
        completed_at_str: format_datetime(report.completed_at()),
        missed: report.incorrect().into_iter().map(ReviewVm::from).collect(),
    }
}
