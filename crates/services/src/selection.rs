use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use quiz_core::model::{OPTION_COUNT, Question, QuestionError, QuestionId};

use crate::bank::QuestionBank;
use crate::error::SessionError;

/// Share of a selection that may come from already-seen questions, in percent.
pub const REPEAT_RATIO_PERCENT: usize = 25;

/// Selection result for a test build.
#[derive(Debug, Clone)]
pub struct TestPlan {
    pub questions: Vec<Question>,
    /// Input history plus every id selected by this plan. The caller decides
    /// when to commit it.
    pub used_ids: HashSet<QuestionId>,
    pub repeat_selected: usize,
    pub new_selected: usize,
}

impl TestPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no questions were selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a randomized test from a bank, favoring unseen questions while
/// allowing a bounded share of repeats from history.
pub struct TestBuilder<'a> {
    bank: &'a QuestionBank,
}

impl<'a> TestBuilder<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank }
    }

    /// Builds a plan of up to `count` questions.
    ///
    /// At most `count * 25%` (floored) come from `used`; the rest are drawn
    /// from questions not in `used`. The combined list is shuffled so repeats
    /// and new questions interleave, and every question gets its options
    /// independently shuffled. A shorter plan than requested is not an error;
    /// callers inspect [`TestPlan::total`] and warn.
    ///
    /// # Errors
    ///
    /// Propagates `QuestionError` from option reordering.
    pub fn build(
        self,
        count: usize,
        used: &HashSet<QuestionId>,
        rng: &mut impl Rng,
    ) -> Result<TestPlan, SessionError> {
        let max_repeats = count * REPEAT_RATIO_PERCENT / 100;

        let mut repeats: Vec<Question> = Vec::new();
        if !used.is_empty() {
            let mut used_ids: Vec<QuestionId> = used.iter().copied().collect();
            // Canonical order first so a seeded rng draws reproducibly.
            used_ids.sort_unstable();
            used_ids.shuffle(rng);
            repeats = used_ids
                .into_iter()
                .take(max_repeats)
                .filter_map(|id| self.bank.get(id).cloned())
                .collect();
        }

        let mut fresh: Vec<Question> = self
            .bank
            .all()
            .iter()
            .filter(|q| !used.contains(&q.id()))
            .cloned()
            .collect();
        fresh.shuffle(rng);
        fresh.truncate(count.saturating_sub(repeats.len()));

        let repeat_selected = repeats.len();
        let new_selected = fresh.len();

        let mut combined = repeats;
        combined.append(&mut fresh);
        combined.shuffle(rng);

        let mut questions = Vec::with_capacity(combined.len());
        for question in &combined {
            questions.push(shuffle_options(question, rng)?);
        }

        if questions.len() < count {
            warn!(
                requested = count,
                selected = questions.len(),
                "fewer questions available than requested"
            );
        }
        debug!(
            repeats = repeat_selected,
            new = new_selected,
            "test selection composed"
        );

        let mut used_ids = used.clone();
        used_ids.extend(questions.iter().map(Question::id));

        Ok(TestPlan {
            questions,
            used_ids,
            repeat_selected,
            new_selected,
        })
    }
}

/// Returns a copy of `question` with its options in random order and the
/// correct index remapped to follow its option. The input is never mutated.
///
/// # Errors
///
/// Propagates `QuestionError` from option reordering.
pub fn shuffle_options(
    question: &Question,
    rng: &mut impl Rng,
) -> Result<Question, QuestionError> {
    let mut order: [usize; OPTION_COUNT] = std::array::from_fn(|i| i);
    order.shuffle(rng);
    question.with_option_order(order)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
