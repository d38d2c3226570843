use std::collections::BTreeSet;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Outcome of writing one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fill {
    Ignored,
    Unchanged,
    Changed,
}

/// The user's selections for one question.
///
/// `selections` always has one slot per blank. `is_correct` is only meaningful
/// once every slot is filled and reads `false` before that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    question_id: QuestionId,
    selections: Vec<Option<String>>,
    is_correct: bool,
}

impl Answer {
    /// An answer with every slot empty, sized to the question's blank count.
    #[must_use]
    pub fn empty(question: &Question) -> Self {
        Self {
            question_id: question.id().clone(),
            selections: vec![None; question.blank_count()],
            is_correct: false,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn selections(&self) -> &[Option<String>] {
        &self.selections
    }

    #[must_use]
    pub fn selection(&self, blank_index: usize) -> Option<&str> {
        self.selections.get(blank_index).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.selections.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when every slot holds a word.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.selections.iter().all(Option::is_some)
    }

    /// True when no slot holds a word ("no answer" in review).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.selections.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.selections
            .iter()
            .any(|slot| slot.as_deref() == Some(word))
    }

    /// Words currently placed in a slot.
    #[must_use]
    pub fn used_words(&self) -> BTreeSet<&str> {
        self.selections.iter().filter_map(Option::as_deref).collect()
    }

    /// Index of the first empty slot, if any.
    #[must_use]
    pub fn next_empty(&self) -> Option<usize> {
        self.selections.iter().position(Option::is_none)
    }

    /// Write `word` into `blank_index`; an empty word clears the slot.
    pub(crate) fn fill(&mut self, question: &Question, blank_index: usize, word: &str) -> Fill {
        let value = (!word.is_empty()).then(|| word.to_owned());
        let Some(slot) = self.selections.get_mut(blank_index) else {
            return Fill::Ignored;
        };
        if *slot == value {
            return Fill::Unchanged;
        }
        *slot = value;
        self.is_correct = self.is_filled() && question.matches(&self.selections);
        Fill::Changed
    }
}
