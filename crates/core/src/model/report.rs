use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::question::Question;

/// Minimum percentage that counts as a passed attempt.
pub const PASS_THRESHOLD_PERCENT: f64 = 50.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Outcome of a single question within a scored attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    number: usize,
    question: String,
    chosen: Option<String>,
    correct: String,
    explanation: String,
    is_correct: bool,
}

impl AnswerReview {
    /// Scores one question against the answer the user picked (`None` when
    /// the question was left unanswered).
    #[must_use]
    pub fn for_answer(number: usize, question: &Question, answer: Option<usize>) -> Self {
        let chosen = answer.and_then(|index| question.options().get(index).cloned());
        let is_correct = answer == Some(question.correct_index());

        Self {
            number,
            question: question.text().to_string(),
            chosen,
            correct: question.correct_option_text().to_string(),
            explanation: question.explanation().to_string(),
            is_correct,
        }
    }

    /// 1-based position of the question within the attempt.
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Text of the option the user chose, or `None` if unanswered.
    #[must_use]
    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// Scored outcome of a completed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    correct: usize,
    total: usize,
    reviews: Vec<AnswerReview>,
}

impl SessionReport {
    /// Builds a report from per-question reviews, tallying correct answers.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `completed_at` is before
    /// `started_at`.
    pub fn from_reviews(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        reviews: Vec<AnswerReview>,
    ) -> Result<Self, ReportError> {
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }

        let correct = reviews.iter().filter(|r| r.is_correct()).count();
        let total = reviews.len();

        Ok(Self {
            started_at,
            completed_at,
            correct,
            total,
            reviews,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn reviews(&self) -> &[AnswerReview] {
        &self.reviews
    }

    /// Share of correct answers in percent. An attempt with no questions
    /// scores 0, never NaN.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.percentage() >= PASS_THRESHOLD_PERCENT
    }

    /// Reviews for questions answered wrongly or not at all.
    #[must_use]
    pub fn incorrect(&self) -> Vec<&AnswerReview> {
        self.reviews.iter().filter(|r| !r.is_correct()).collect()
    }

    /// True when every question was answered correctly.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}
