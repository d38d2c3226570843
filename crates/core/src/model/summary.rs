use chrono::{DateTime, Duration, Utc};

use crate::model::ids::QuestionId;
use crate::model::session::SessionState;

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Correct answers against the number of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Percentage rounded half-up to a whole number.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 + self.total / 2) / self.total
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self)
    }
}

/// Coarse rating shown with the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl ScoreBand {
    #[must_use]
    pub fn for_score(score: &Score) -> Self {
        let scaled = score.correct * 100;
        let at_least = |pct: usize| score.total > 0 && scaled >= pct * score.total;
        if at_least(90) {
            ScoreBand::Excellent
        } else if at_least(70) {
            ScoreBand::Good
        } else if at_least(50) {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsPractice
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! You have a great command of sentence construction!",
            ScoreBand::Good => "Good job! You have a solid understanding of sentence construction.",
            ScoreBand::Fair => {
                "Not bad. Keep practicing to improve your sentence construction skills."
            }
            ScoreBand::NeedsPractice => {
                "You need more practice with sentence construction. Keep trying!"
            }
        }
    }
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

/// One row of the end-of-quiz review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub question_id: QuestionId,
    pub position: usize,
    pub your_sentence: String,
    pub correct_sentence: String,
    pub selections: Vec<Option<String>>,
    pub is_correct: bool,
    /// False when every slot was left empty.
    pub answered: bool,
}

/// Final score and per-question review of a completed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    score: Score,
    items: Vec<ReviewItem>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSummary {
    /// Build the summary of a completed session. Returns `None` while the session runs.
    #[must_use]
    pub fn from_state(
        state: &SessionState,
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        if !state.is_complete() {
            return None;
        }

        let items = state
            .questions()
            .iter()
            .enumerate()
            .map(|(idx, question)| {
                let answer = state.answer_for(question.id());
                let selections = answer.map_or_else(
                    || vec![None; question.blank_count()],
                    |a| a.selections().to_vec(),
                );
                ReviewItem {
                    question_id: question.id().clone(),
                    position: idx + 1,
                    your_sentence: question.render(&selections),
                    correct_sentence: question.correct_sentence(),
                    is_correct: answer.is_some_and(|a| a.is_correct()),
                    answered: answer.is_some_and(|a| !a.is_blank()),
                    selections,
                }
            })
            .collect();

        Some(Self {
            score: state.score(),
            items,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        self.score.band()
    }

    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Wall-clock time spent on the attempt, when both ends are known.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        Some(self.completed_at? - self.started_at?)
    }

    #[must_use]
    pub fn share_text(&self) -> String {
        format!(
            "I scored {} out of {} ({}%) on the Sentence Construction Quiz!",
            self.score.correct,
            self.score.total,
            self.score.percent()
        )
    }
}
