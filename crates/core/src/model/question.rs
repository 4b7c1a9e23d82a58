use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question carries exactly this many answer options.
pub const OPTION_COUNT: usize = 3;

/// Explanation text used when the source document omits one.
pub const DEFAULT_EXPLANATION: &str = "No explanation provided.";

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Raw question fields as they arrive from a source document, before
/// validation. `correct_answer` is kept wide so an out-of-range value can be
/// reported as observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
    pub explanation: Option<String>,
}

impl QuestionDraft {
    /// Validates and normalizes the draft.
    ///
    /// Text, options, and explanation are trimmed; a missing or blank
    /// explanation falls back to [`DEFAULT_EXPLANATION`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the question text is blank,
    /// `QuestionError::WrongOptionCount` if there are not exactly
    /// [`OPTION_COUNT`] options, `QuestionError::EmptyOption` if any option is
    /// blank, and `QuestionError::CorrectIndexOutOfRange` if the correct
    /// answer does not index into the options.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        if self.options.len() != OPTION_COUNT {
            return Err(QuestionError::WrongOptionCount {
                found: self.options.len(),
            });
        }
        let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
        for (index, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_string();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            options.push(option);
        }

        let correct_index = usize::try_from(self.correct_answer)
            .ok()
            .filter(|i| *i < OPTION_COUNT)
            .ok_or(QuestionError::CorrectIndexOutOfRange {
                found: self.correct_answer,
            })?;

        let explanation = match self.explanation {
            Some(e) if !e.trim().is_empty() => e.trim().to_string(),
            _ => DEFAULT_EXPLANATION.to_string(),
        };

        Ok(ValidatedQuestion {
            text,
            options,
            correct_index,
            explanation,
        })
    }
}

/// A question that passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    text: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            options: self.options,
            correct_index: self.correct_index,
            explanation: self.explanation,
        }
    }
}

/// One validated quiz item: exactly [`OPTION_COUNT`] options, one of which is
/// correct. Immutable once built; reordering options goes through
/// [`Question::with_option_order`], which returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_option_text(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Returns a copy of this question with options rearranged so that
    /// position `i` of the result holds option `order[i]` of the original.
    /// The correct index is remapped to follow its option, so the correct
    /// option's text is unchanged even when two options share text.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidOptionOrder` unless `order` is a
    /// permutation of `0..OPTION_COUNT`.
    pub fn with_option_order(
        &self,
        order: [usize; OPTION_COUNT],
    ) -> Result<Question, QuestionError> {
        let mut seen = [false; OPTION_COUNT];
        for &source in &order {
            if source >= OPTION_COUNT || seen[source] {
                return Err(QuestionError::InvalidOptionOrder { order });
            }
            seen[source] = true;
        }

        let options = order
            .iter()
            .map(|&source| self.options[source].clone())
            .collect();
        let correct_index = order
            .iter()
            .position(|&source| source == self.correct_index)
            .ok_or(QuestionError::InvalidOptionOrder { order })?;

        Ok(Question {
            id: self.id,
            text: self.text.clone(),
            options,
            correct_index,
            explanation: self.explanation.clone(),
        })
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must have exactly {OPTION_COUNT} options, found {found}")]
    WrongOptionCount { found: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct answer index {found} is outside 0..{OPTION_COUNT}")]
    CorrectIndexOutOfRange { found: i64 },

    #[error("option order {order:?} is not a permutation")]
    InvalidOptionOrder { order: [usize; OPTION_COUNT] },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
