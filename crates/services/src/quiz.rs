use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use rand::rng;
use tracing::{info, warn};

use quiz_core::Clock;
use quiz_core::model::{QuestionId, SessionReport};

use crate::bank::QuestionBank;
use crate::error::{LoadError, SessionError};
use crate::loader::{QuestionLoader, QuestionSource};
use crate::selection::{TestBuilder, TestPlan};
use crate::session::QuizSession;

/// Number of questions per test unless configured otherwise.
pub const DEFAULT_TEST_SIZE: usize = 45;

/// What the welcome screen needs to know about the loaded bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankSummary {
    /// Questions in the bank.
    pub available: usize,
    /// Configured test size.
    pub requested: usize,
    /// Questions an upcoming test will actually contain.
    pub test_size: usize,
}

impl BankSummary {
    /// True when the bank cannot fill a full-size test.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.available < self.requested
    }
}

//
// ─── QUIZ SERVICE ──────────────────────────────────────────────────────────────
//

/// Orchestrates bank loading, used-question history, and session creation.
///
/// The bank is loaded once and cached; the history accumulates across tests
/// for the lifetime of the service and can be reset on demand.
pub struct QuizService {
    clock: Clock,
    loader: QuestionLoader,
    test_size: usize,
    bank: OnceLock<QuestionBank>,
    history: Mutex<HashSet<QuestionId>>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, source: QuestionSource, test_size: usize) -> Self {
        Self {
            clock,
            loader: QuestionLoader::new(source),
            test_size,
            bank: OnceLock::new(),
            history: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn source(&self) -> &QuestionSource {
        self.loader.source()
    }

    #[must_use]
    pub fn test_size(&self) -> usize {
        self.test_size
    }

    /// Loads and caches the question bank on first call; later calls return
    /// the cached summary without touching the source again.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when reading or validation fails. A failed attempt
    /// caches nothing, so calling again retries the load.
    pub async fn load_bank(&self) -> Result<BankSummary, LoadError> {
        if let Some(bank) = self.bank.get() {
            return Ok(self.summarize(bank));
        }

        let loaded = self.loader.load().await?;
        let bank = self.bank.get_or_init(|| loaded);
        Ok(self.summarize(bank))
    }

    /// Summary of the already-loaded bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::BankNotLoaded` before a successful
    /// [`QuizService::load_bank`].
    pub fn bank_summary(&self) -> Result<BankSummary, SessionError> {
        let bank = self.bank.get().ok_or(SessionError::BankNotLoaded)?;
        Ok(self.summarize(bank))
    }

    fn summarize(&self, bank: &QuestionBank) -> BankSummary {
        BankSummary {
            available: bank.len(),
            requested: self.test_size,
            test_size: self.test_size.min(bank.len()),
        }
    }

    /// Starts a new test and commits its question ids to the history.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::BankNotLoaded` before a load,
    /// `SessionError::EmptyBank` when the bank has no questions, and
    /// `SessionError::EmptySelection` when every question is used up and the
    /// repeat budget is zero (resetting the history clears that state).
    pub fn start_test(&self) -> Result<QuizSession, SessionError> {
        let bank = self.bank.get().ok_or(SessionError::BankNotLoaded)?;
        if bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        let count = self.test_size.min(bank.len());
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        let mut rng = rng();
        let plan = TestBuilder::new(bank).build(count, &history, &mut rng)?;
        if plan.is_empty() {
            warn!("selection produced no questions, history may need a reset");
            return Err(SessionError::EmptySelection);
        }

        let TestPlan {
            questions,
            used_ids,
            repeat_selected,
            new_selected,
        } = plan;
        let session = QuizSession::new(questions, self.clock.now())?;
        *history = used_ids;

        info!(
            questions = session.total_questions(),
            repeats = repeat_selected,
            new = new_selected,
            "test started"
        );
        Ok(session)
    }

    /// Closes the session with the service clock and scores it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session was already
    /// submitted.
    pub fn finish_test(&self, session: &mut QuizSession) -> Result<SessionReport, SessionError> {
        session.submit(self.clock.now())
    }

    /// Forgets which questions have been seen.
    pub fn reset_history(&self) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        let cleared = history.len();
        history.clear();
        info!(cleared, "question history reset");
    }

    /// Number of distinct question ids seen so far.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("source", self.loader.source())
            .field("test_size", &self.test_size)
            .field("bank_loaded", &self.bank.get().is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
