use std::fmt;
use std::path::PathBuf;

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use quiz_core::model::{Question, QuestionDraft, QuestionError, QuestionId};

use crate::bank::QuestionBank;
use crate::error::LoadError;

//
// ─── SOURCE ────────────────────────────────────────────────────────────────────
//

/// Where a question document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    File(PathBuf),
    Url(Url),
}

impl QuestionSource {
    /// Interprets a raw source string: `http`/`https` URLs fetch over the
    /// network, everything else is treated as a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(PathBuf::from(raw)),
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::File(path) => write!(f, "{}", path.display()),
            QuestionSource::Url(url) => write!(f, "{url}"),
        }
    }
}

//
// ─── LOADER ────────────────────────────────────────────────────────────────────
//

/// Reads a question document from its source and validates it into a
/// [`QuestionBank`].
#[derive(Debug, Clone)]
pub struct QuestionLoader {
    client: Client,
    source: QuestionSource,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(source: QuestionSource) -> Self {
        Self {
            client: Client::new(),
            source,
        }
    }

    #[must_use]
    pub fn source(&self) -> &QuestionSource {
        &self.source
    }

    /// Fetches and validates the question document.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::File`/`LoadError::Http`/`LoadError::HttpStatus`
    /// when the document cannot be read, and the parse/validation variants
    /// when its content is rejected. Any error discards the whole batch.
    pub async fn load(&self) -> Result<QuestionBank, LoadError> {
        let text = match &self.source {
            QuestionSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::File {
                    path: path.clone(),
                    source,
                })?,
            QuestionSource::Url(url) => {
                let response = self.client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(LoadError::HttpStatus(response.status()));
                }
                response.text().await?
            }
        };

        let bank = parse_bank(&text)?;
        info!(count = bank.len(), source = %self.source, "question bank loaded");
        Ok(bank)
    }
}

//
// ─── DOCUMENT PARSING ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    questions: Option<Vec<RawQuestion>>,
}

/// Question entry as authored, all fields optional so that missing ones can
/// be reported per field instead of as a blanket JSON error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<i64>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Parses and validates a question document into a bank.
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed JSON,
/// `LoadError::MissingQuestionsArray` when the envelope is absent, and a
/// per-field variant for the first invalid entry. Validation is fail-fast;
/// one bad entry rejects the whole document.
pub fn parse_bank(text: &str) -> Result<QuestionBank, LoadError> {
    let document: RawDocument = serde_json::from_str(text)?;
    let entries = document.questions.ok_or(LoadError::MissingQuestionsArray)?;

    let mut questions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        questions.push(validate_entry(index, entry)?);
    }

    QuestionBank::new(questions)
}

fn validate_entry(index: usize, raw: RawQuestion) -> Result<Question, LoadError> {
    let id = match raw.id {
        Some(value) => QuestionId::new(value),
        None => {
            let fallback = QuestionId::new(index as u64 + 1);
            warn!(index, id = %fallback, "question has no id, defaulting to its position");
            fallback
        }
    };

    if raw
        .explanation
        .as_ref()
        .is_none_or(|e| e.trim().is_empty())
    {
        warn!(%id, "question has no explanation, using placeholder");
    }

    let correct_answer = raw.correct_answer;
    let draft = QuestionDraft {
        text: raw.question.unwrap_or_default(),
        options: raw.options.unwrap_or_default(),
        // Missing in the source; guaranteed out of range so validation
        // reports it on the right field.
        correct_answer: correct_answer.unwrap_or(-1),
        explanation: raw.explanation,
    };

    let validated = draft.validate().map_err(|error| match error {
        QuestionError::EmptyText => LoadError::InvalidQuestionText { id },
        QuestionError::WrongOptionCount { found } => LoadError::InvalidOptionCount { id, found },
        QuestionError::EmptyOption { index } => LoadError::EmptyOptionText { id, index },
        QuestionError::CorrectIndexOutOfRange { .. } => LoadError::InvalidCorrectAnswer {
            id,
            found: correct_answer,
        },
        other => LoadError::Validation { id, source: other },
    })?;

    Ok(validated.assign_id(id))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
