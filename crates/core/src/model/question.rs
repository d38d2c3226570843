use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;

/// Placeholder that marks one blank inside a question template.
pub const BLANK_MARKER: &str = "_____________";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question has no blanks")]
    NoBlanks,

    #[error("correct answer contains an empty word")]
    EmptyAnswerWord,

    #[error("correct answer `{word}` is not among the options")]
    AnswerNotInOptions { word: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set is empty")]
    Empty,

    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error("question {id}: {source}")]
    InvalidQuestion {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A sentence with ordered blanks and the word bank offered to fill them.
///
/// The length of `correct_answer` is the blank count; the template is only used
/// for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    template: String,
    options: Vec<String>,
    correct_answer: Vec<String>,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoBlanks` if `correct_answer` is empty,
    /// `QuestionError::EmptyAnswerWord` if one of its words is empty, and
    /// `QuestionError::AnswerNotInOptions` if a word is missing from `options`.
    pub fn new(
        id: QuestionId,
        template: impl Into<String>,
        options: Vec<String>,
        correct_answer: Vec<String>,
    ) -> Result<Self, QuestionError> {
        if correct_answer.is_empty() {
            return Err(QuestionError::NoBlanks);
        }
        if correct_answer.iter().any(String::is_empty) {
            return Err(QuestionError::EmptyAnswerWord);
        }
        if let Some(word) = correct_answer.iter().find(|word| !options.contains(word)) {
            return Err(QuestionError::AnswerNotInOptions { word: word.clone() });
        }

        Ok(Self {
            id,
            template: template.into(),
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &[String] {
        &self.correct_answer
    }

    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.correct_answer.len()
    }

    /// Text fragments around the blank markers, in order.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        self.template.split(BLANK_MARKER).collect()
    }

    /// Render the sentence with `selections` substituted; empty slots keep the marker.
    #[must_use]
    pub fn render(&self, selections: &[Option<String>]) -> String {
        let mut out = String::with_capacity(self.template.len());
        for (idx, segment) in self.template.split(BLANK_MARKER).enumerate() {
            if idx > 0 {
                let word = selections.get(idx - 1).and_then(Option::as_deref);
                out.push_str(word.unwrap_or(BLANK_MARKER));
            }
            out.push_str(segment);
        }
        out
    }

    #[must_use]
    pub fn correct_sentence(&self) -> String {
        let filled: Vec<Option<String>> = self.correct_answer.iter().cloned().map(Some).collect();
        self.render(&filled)
    }

    /// Exact positional match of every slot against the correct answer.
    #[must_use]
    pub fn matches(&self, selections: &[Option<String>]) -> bool {
        selections.len() == self.correct_answer.len()
            && selections
                .iter()
                .zip(&self.correct_answer)
                .all(|(selected, correct)| selected.as_deref() == Some(correct.as_str()))
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered, non-empty list of questions with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` for an empty list and
    /// `QuestionSetError::DuplicateId` when two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionSetError::DuplicateId(question.id().clone()));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}
