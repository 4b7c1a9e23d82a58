use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{AnswerReview, Question, SessionReport};

use crate::error::SessionError;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    /// 1-based position of the question under the cursor.
    pub position: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one quiz attempt.
///
/// Holds the selected question snapshots, one answer slot per question, and a
/// navigation cursor clamped to the question range. Created through
/// `QuizService::start_test`; scoring happens once in [`QuizSession::submit`].
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    current: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over the given question snapshots.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            answers,
            current: 0,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based cursor into the question list.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question under the cursor. The cursor never leaves the question
    /// range, so there is always one.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// The recorded answer for the question under the cursor.
    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.current]
    }

    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.current_answer().is_some()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.answers.iter().flatten().count(),
            position: self.current + 1,
            is_complete: self.is_complete(),
        }
    }

    /// Record `option` as the answer for the question under the cursor.
    /// Answers may be changed until the session is submitted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after submit and
    /// `SessionError::OptionOutOfRange` when `option` does not index into the
    /// current question's options.
    pub fn select_answer(&mut self, option: usize) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if option >= self.current_question().options().len() {
            return Err(SessionError::OptionOutOfRange { index: option });
        }

        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Move the cursor to the next question; no-op on the last one.
    pub fn advance(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    /// Move the cursor to the previous question; no-op on the first one.
    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Close the session and score it.
    ///
    /// `completed_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session was already
    /// submitted, and propagates report construction failures.
    pub fn submit(&mut self, completed_at: DateTime<Utc>) -> Result<SessionReport, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        self.completed_at = Some(completed_at);

        let reviews: Vec<AnswerReview> = self
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(index, (question, answer))| {
                AnswerReview::for_answer(index + 1, question, *answer)
            })
            .collect();

        Ok(SessionReport::from_reviews(
            self.started_at,
            completed_at,
            reviews,
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.iter().flatten().count())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
