use std::fmt;

/// Nudge toward the next word for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// Nothing is filled yet.
    FirstWord(String),
    /// The word expected in the first empty slot.
    NextWord(String),
    /// Every slot is filled, but the order is off.
    Rearrange,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::FirstWord(word) => write!(f, "First word should be \"{word}\""),
            Hint::NextWord(word) => write!(f, "Next blank should be \"{word}\""),
            Hint::Rearrange => f.write_str("Try a different arrangement of words"),
        }
    }
}
