use services::{QuizService, QuizSession, SessionError, SessionProgress};
use tracing::warn;

use crate::views::ViewError;
use crate::vm::report_vm::{ReportVm, map_report};

/// Everything the session screen can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionIntent {
    Select(usize),
    Previous,
    Next,
    Submit,
}

/// UI-facing wrapper around one quiz attempt.
pub struct SessionVm {
    session: QuizSession,
}

impl SessionVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        self.session.current_question().text()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        self.session.current_question().options()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.session.current_answer()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.session.is_current_answered()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.session.is_first()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.session.is_last()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.progress()
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when the option index is out of range or
    /// the attempt was already submitted.
    pub fn select(&mut self, option: usize) -> Result<(), ViewError> {
        self.session.select_answer(option).map_err(|err| {
            warn!(error = %err, option, "answer selection rejected");
            ViewError::Unknown
        })
    }

    pub fn previous(&mut self) {
        self.session.retreat();
    }

    pub fn next(&mut self) {
        self.session.advance();
    }

    /// Scores the attempt and maps it for the results screen.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when the attempt was already submitted.
    pub fn finish(&mut self, quiz: &QuizService) -> Result<ReportVm, ViewError> {
        let report = quiz.finish_test(&mut self.session).map_err(|err| {
            warn!(error = %err, "scoring failed");
            ViewError::Unknown
        })?;
        Ok(map_report(&report))
    }
}

/// Loads the bank if needed, then assembles a fresh attempt.
///
/// # Errors
///
/// Returns `ViewError::LoadFailed` when the question bank cannot be read and
/// `ViewError::EmptySelection` when no questions can be selected for a test.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_test(quiz: &QuizService) -> Result<SessionVm, ViewError> {
    if let Err(err) = quiz.load_bank().await {
        warn!(error = %err, "question bank load failed");
        return Err(ViewError::LoadFailed);
    }

    let session = match quiz.start_test() {
        Ok(session) => session,
        Err(SessionError::EmptyBank | SessionError::EmptySelection | SessionError::Empty) => {
            return Err(ViewError::EmptySelection);
        }
        Err(SessionError::BankNotLoaded) => return Err(ViewError::BankNotLoaded),
        Err(_) => return Err(ViewError::Unknown),
    };

    Ok(SessionVm::new(session))
}
