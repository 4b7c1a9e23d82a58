use std::collections::HashMap;

use quiz_core::model::{Question, QuestionId};

use crate::error::LoadError;

/// Validated, immutable question collection.
///
/// Built once by the loader; sessions only ever read from it. Source order is
/// preserved in [`QuestionBank::all`].
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Builds a bank from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::DuplicateId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            if by_id.insert(question.id(), index).is_some() {
                return Err(LoadError::DuplicateId { id: question.id() });
            }
        }

        Ok(Self { questions, by_id })
    }

    /// All questions in source order.
    #[must_use]
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Looks a question up by id.
    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.by_id.get(&id).map(|&index| &self.questions[index])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
