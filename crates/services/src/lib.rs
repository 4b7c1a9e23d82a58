#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod loader;
pub mod quiz;
pub mod selection;
pub mod session;

pub use quiz_core::Clock;

pub use bank::QuestionBank;
pub use error::{LoadError, SessionError};
pub use loader::{QuestionLoader, QuestionSource, parse_bank};
pub use quiz::{BankSummary, DEFAULT_TEST_SIZE, QuizService};
pub use selection::{REPEAT_RATIO_PERCENT, TestBuilder, TestPlan, shuffle_options};
pub use session::{QuizSession, SessionProgress};
