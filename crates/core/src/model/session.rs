use std::collections::{BTreeSet, HashMap, HashSet};

use crate::model::answer::{Answer, Fill};
use crate::model::hint::Hint;
use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionSet};
use crate::model::summary::Score;
use crate::model::timer::TimerView;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Timing knobs for a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seconds granted per question.
    pub time_limit_secs: u32,
    /// Remaining seconds at which the low-time warning fires.
    pub warning_threshold_secs: u32,
}

impl SessionConfig {
    pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;
    pub const DEFAULT_WARNING_THRESHOLD_SECS: u32 = 10;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: Self::DEFAULT_TIME_LIMIT_SECS,
            warning_threshold_secs: Self::DEFAULT_WARNING_THRESHOLD_SECS,
        }
    }
}

//
// ─── INTENTS & EVENTS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

impl LoadStatus {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadStatus::Pending)
    }

    /// Failure message, if loading failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything that can change a `SessionState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIntent {
    LoadSucceeded(QuestionSet),
    LoadFailed(String),
    /// Write `word` into a blank; an empty word clears it.
    SelectAnswer {
        question_id: QuestionId,
        word: String,
        blank_index: usize,
    },
    /// Place the current question's option into its first empty blank.
    PlaceOption { option_index: usize },
    Advance,
    Tick,
    UseHint,
    Reset,
}

/// Observable consequences of a transition, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Loaded { questions: usize },
    LoadFailed { message: String },
    AnswerResolved { question_id: QuestionId, correct: bool },
    HintUsed { question_id: QuestionId },
    TimerWarning { remaining: u32 },
    TimedOut { question_id: QuestionId },
    Advanced { index: usize },
    Completed,
    Reset,
}

/// Result of reducing one intent.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub events: Vec<SessionEvent>,
    /// False when the intent was ignored and the state is unchanged.
    pub accepted: bool,
}

/// Aggregated position within the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the current question, 0 before load.
    pub position: usize,
    pub total: usize,
    /// Questions whose every blank is filled.
    pub answered: usize,
    /// Share of the attempt reached, by position, rounded half-up.
    pub percent_complete: usize,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// State of one quiz attempt.
///
/// All mutation goes through [`SessionState::reduce`]; everything else is a read-only view.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    config: SessionConfig,
    questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<QuestionId, Answer>,
    hints_used: HashSet<QuestionId>,
    time_remaining: u32,
    is_complete: bool,
    load_status: LoadStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionState {
    /// Fresh, pending state with the full time limit on the clock.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            questions: Vec::new(),
            current_index: 0,
            answers: HashMap::new(),
            hints_used: HashSet::new(),
            time_remaining: config.time_limit_secs,
            is_complete: false,
            load_status: LoadStatus::Pending,
        }
    }

    /// Apply one intent and return the next state with the events it produced.
    ///
    /// Intents that do not apply to the current state (out-of-range blanks, ticks
    /// before load, anything but `Reset` after completion) are ignored.
    #[must_use]
    pub fn reduce(mut self, intent: SessionIntent) -> Transition {
        let mut events = Vec::new();
        let accepted = match intent {
            SessionIntent::LoadSucceeded(set) => self.install(set, &mut events),
            SessionIntent::LoadFailed(message) => self.fail(message, &mut events),
            SessionIntent::SelectAnswer {
                question_id,
                word,
                blank_index,
            } => self.select(&question_id, &word, blank_index, &mut events),
            SessionIntent::PlaceOption { option_index } => {
                self.place_option(option_index, &mut events)
            }
            SessionIntent::Advance => self.advance(&mut events),
            SessionIntent::Tick => self.tick(&mut events),
            SessionIntent::UseHint => self.use_hint(&mut events),
            SessionIntent::Reset => {
                self = Self::new(self.config);
                events.push(SessionEvent::Reset);
                true
            }
        };

        Transition {
            state: self,
            events,
            accepted,
        }
    }

    fn install(&mut self, set: QuestionSet, events: &mut Vec<SessionEvent>) -> bool {
        if self.load_status != LoadStatus::Pending {
            return false;
        }
        let count = set.len();
        self.questions = set.into_questions();
        self.current_index = 0;
        self.time_remaining = self.config.time_limit_secs;
        self.load_status = LoadStatus::Ready;
        events.push(SessionEvent::Loaded { questions: count });
        true
    }

    fn fail(&mut self, message: String, events: &mut Vec<SessionEvent>) -> bool {
        if self.load_status != LoadStatus::Pending {
            return false;
        }
        self.load_status = LoadStatus::Failed(message.clone());
        events.push(SessionEvent::LoadFailed { message });
        true
    }

    fn select(
        &mut self,
        question_id: &QuestionId,
        word: &str,
        blank_index: usize,
        events: &mut Vec<SessionEvent>,
    ) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(question) = self.questions.iter().find(|q| q.id() == question_id) else {
            return false;
        };
        if blank_index >= question.blank_count() {
            return false;
        }
        if !word.is_empty() && !question.options().iter().any(|option| option == word) {
            return false;
        }

        let answer = self
            .answers
            .entry(question_id.clone())
            .or_insert_with(|| Answer::empty(question));
        match answer.fill(question, blank_index, word) {
            Fill::Ignored => false,
            Fill::Unchanged => true,
            Fill::Changed => {
                if answer.is_filled() {
                    events.push(SessionEvent::AnswerResolved {
                        question_id: question_id.clone(),
                        correct: answer.is_correct(),
                    });
                }
                true
            }
        }
    }

    fn place_option(&mut self, option_index: usize, events: &mut Vec<SessionEvent>) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return false;
        };
        let Some(word) = question.options().get(option_index).cloned() else {
            return false;
        };
        let blank_index = match self.answers.get(question.id()) {
            Some(answer) if answer.contains_word(&word) => return false,
            Some(answer) => answer.next_empty(),
            None => Some(0),
        };
        let Some(blank_index) = blank_index else {
            return false;
        };
        let question_id = question.id().clone();
        self.select(&question_id, &word, blank_index, events)
    }

    fn advance(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        if !self.is_running() {
            return false;
        }
        self.step(events);
        true
    }

    fn tick(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        if !self.is_running() {
            return false;
        }

        if self.time_remaining > 0 {
            self.time_remaining -= 1;
            if self.time_remaining > 0 && self.time_remaining == self.config.warning_threshold_secs
            {
                events.push(SessionEvent::TimerWarning {
                    remaining: self.time_remaining,
                });
            }
        }

        if self.time_remaining == 0 {
            if let Some(question) = self.questions.get(self.current_index) {
                let question_id = question.id().clone();
                self.answers
                    .entry(question_id.clone())
                    .or_insert_with(|| Answer::empty(question));
                events.push(SessionEvent::TimedOut { question_id });
            }
            self.step(events);
        }
        true
    }

    fn use_hint(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(question_id) = self.current_question().map(|q| q.id().clone()) else {
            return false;
        };
        self.hints_used.insert(question_id.clone());
        events.push(SessionEvent::HintUsed { question_id });
        true
    }

    /// Move to the next question with a full clock, or complete on the last one.
    fn step(&mut self, events: &mut Vec<SessionEvent>) {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.time_remaining = self.config.time_limit_secs;
            events.push(SessionEvent::Advanced {
                index: self.current_index,
            });
        } else {
            self.is_complete = true;
            events.push(SessionEvent::Completed);
        }
    }

    // ─── Views ─────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<QuestionId, Answer> {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    #[must_use]
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.load_status == LoadStatus::Ready
    }

    /// Loaded and not yet complete: the only phase in which the clock runs.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_ready() && !self.is_complete
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&Answer> {
        self.current_question()
            .and_then(|question| self.answers.get(question.id()))
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.current_answer().map_or(0, Answer::filled_count)
    }

    #[must_use]
    pub fn total_blanks(&self) -> usize {
        self.current_question().map_or(0, Question::blank_count)
    }

    /// Whether every blank of the current question is filled.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.current_question().is_some() && self.filled_count() == self.total_blanks()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        Score {
            correct: self.answers.values().filter(|a| a.is_correct()).count(),
            total: self.questions.len(),
        }
    }

    /// Words already placed in the current question.
    #[must_use]
    pub fn used_words(&self) -> BTreeSet<&str> {
        self.current_answer()
            .map(Answer::used_words)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_word_used(&self, word: &str) -> bool {
        self.current_answer()
            .is_some_and(|answer| answer.contains_word(word))
    }

    /// First empty blank of the current question.
    #[must_use]
    pub fn next_empty_blank(&self) -> Option<usize> {
        let question = self.current_question()?;
        match self.answers.get(question.id()) {
            Some(answer) => answer.next_empty(),
            None => Some(0),
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<Hint> {
        let question = self.current_question()?;
        let answer = self.answers.get(question.id());
        if answer.map_or(0, Answer::filled_count) == 0 {
            return question.correct_answer().first().cloned().map(Hint::FirstWord);
        }
        match answer.and_then(Answer::next_empty) {
            Some(idx) => question.correct_answer().get(idx).cloned().map(Hint::NextWord),
            None => Some(Hint::Rearrange),
        }
    }

    #[must_use]
    pub fn hint_used(&self) -> bool {
        self.current_question()
            .is_some_and(|question| self.hints_used.contains(question.id()))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let position = if total == 0 { 0 } else { self.current_index + 1 };
        SessionProgress {
            position,
            total,
            answered: self.answers.values().filter(|a| a.is_filled()).count(),
            percent_complete: if total == 0 {
                0
            } else {
                (position * 100 + total / 2) / total
            },
        }
    }

    #[must_use]
    pub fn timer(&self) -> TimerView {
        TimerView::new(self.time_remaining, self.config.time_limit_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::BLANK_MARKER;
    use crate::model::summary::QuizSummary;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    fn question(id: &str, options: &[&str], answer: &[&str]) -> Question {
        let template = vec![BLANK_MARKER; answer.len()].join(" and ");
        Question::new(QuestionId::new(id), template, words(options), words(answer)).unwrap()
    }

    fn two_question_set() -> QuestionSet {
        QuestionSet::new(vec![
            question("q1", &["fast", "car", "slow", "bike"], &["fast", "car"]),
            question("q2", &["red", "blue", "green"], &["blue"]),
        ])
        .unwrap()
    }

    fn ready() -> SessionState {
        apply(
            SessionState::default(),
            SessionIntent::LoadSucceeded(two_question_set()),
        )
    }

    fn apply(state: SessionState, intent: SessionIntent) -> SessionState {
        state.reduce(intent).state
    }

    fn select(state: SessionState, id: &str, word: &str, blank_index: usize) -> SessionState {
        apply(
            state,
            SessionIntent::SelectAnswer {
                question_id: QuestionId::new(id),
                word: word.into(),
                blank_index,
            },
        )
    }

    #[test]
    fn load_installs_questions_and_resets_clock() {
        let transition =
            SessionState::default().reduce(SessionIntent::LoadSucceeded(two_question_set()));
        let state = transition.state;
        assert_eq!(state.load_status(), &LoadStatus::Ready);
        assert_eq!(state.questions().len(), 2);
        assert_eq!(state.time_remaining(), 60);
        assert_eq!(transition.events, vec![SessionEvent::Loaded { questions: 2 }]);
    }

    #[test]
    fn load_outcome_is_ignored_once_settled() {
        let failed = apply(SessionState::default(), SessionIntent::LoadFailed("boom".into()));
        assert_eq!(failed.load_status(), &LoadStatus::Failed("boom".into()));

        let transition = failed.reduce(SessionIntent::LoadSucceeded(two_question_set()));
        assert!(!transition.accepted);
        assert!(transition.state.questions().is_empty());
    }

    #[test]
    fn clearing_a_slot_restores_empty_and_incorrect() {
        let state = select(ready(), "q1", "fast", 0);
        let state = select(state, "q1", "car", 1);
        assert!(state.current_answer().unwrap().is_correct());

        let state = select(state, "q1", "", 1);
        let answer = state.current_answer().unwrap();
        assert_eq!(answer.selection(1), None);
        assert!(!answer.is_correct());
        assert!(!state.can_advance());
    }

    #[test]
    fn correctness_requires_exact_positions() {
        let state = select(ready(), "q1", "car", 0);
        let state = select(state, "q1", "fast", 1);
        let answer = state.current_answer().unwrap();
        assert!(answer.is_filled());
        assert!(!answer.is_correct());
    }

    #[test]
    fn resolution_event_fires_when_last_blank_is_filled() {
        let state = select(ready(), "q1", "fast", 0);
        let transition = state.reduce(SessionIntent::SelectAnswer {
            question_id: QuestionId::new("q1"),
            word: "car".into(),
            blank_index: 1,
        });
        assert_eq!(
            transition.events,
            vec![SessionEvent::AnswerResolved {
                question_id: QuestionId::new("q1"),
                correct: true
            }]
        );
    }

    #[test]
    fn out_of_range_blank_is_ignored() {
        let before = ready();
        let transition = before.clone().reduce(SessionIntent::SelectAnswer {
            question_id: QuestionId::new("q1"),
            word: "fast".into(),
            blank_index: 5,
        });
        assert!(!transition.accepted);
        assert_eq!(transition.state, before);
        assert!(transition.state.answers().is_empty());
    }

    #[test]
    fn word_outside_options_is_ignored() {
        let before = ready();
        let transition = before.clone().reduce(SessionIntent::SelectAnswer {
            question_id: QuestionId::new("q1"),
            word: "zebra".into(),
            blank_index: 0,
        });
        assert!(!transition.accepted);
        assert!(transition.events.is_empty());
        assert_eq!(transition.state, before);
        assert!(transition.state.used_words().is_empty());
    }

    #[test]
    fn unknown_question_is_ignored() {
        let before = ready();
        let after = select(before.clone(), "nope", "fast", 0);
        assert_eq!(after, before);
    }

    #[test]
    fn advance_never_overshoots() {
        let mut state = ready();
        for _ in 0..5 {
            state = apply(state, SessionIntent::Advance);
            assert!(state.current_index() <= 1);
        }
        assert_eq!(state.current_index(), 1);
        assert!(state.is_complete());
    }

    #[test]
    fn advance_resets_clock() {
        let state = apply(ready(), SessionIntent::Tick);
        assert_eq!(state.time_remaining(), 59);
        let state = apply(state, SessionIntent::Advance);
        assert_eq!(state.time_remaining(), 60);
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn timeout_synthesizes_an_empty_answer() {
        let mut state = ready();
        let mut events = Vec::new();
        for _ in 0..60 {
            let transition = state.reduce(SessionIntent::Tick);
            events.extend(transition.events);
            state = transition.state;
        }

        let answer = state.answer_for(&QuestionId::new("q1")).unwrap();
        assert!(answer.is_blank());
        assert_eq!(answer.selections().len(), 2);
        assert!(!answer.is_correct());
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.time_remaining(), 60);
        assert_eq!(
            events,
            vec![
                SessionEvent::TimerWarning { remaining: 10 },
                SessionEvent::TimedOut {
                    question_id: QuestionId::new("q1")
                },
                SessionEvent::Advanced { index: 1 },
            ]
        );
    }

    #[test]
    fn timeout_keeps_a_partial_answer() {
        let mut state = select(ready(), "q1", "slow", 1);
        for _ in 0..60 {
            state = apply(state, SessionIntent::Tick);
        }
        let answer = state.answer_for(&QuestionId::new("q1")).unwrap();
        assert_eq!(answer.selection(1), Some("slow"));
    }

    #[test]
    fn ticks_are_ignored_before_load_and_after_completion() {
        let pending = SessionState::default();
        let transition = pending.reduce(SessionIntent::Tick);
        assert!(!transition.accepted);
        assert_eq!(transition.state.time_remaining(), 60);

        let done = apply(apply(ready(), SessionIntent::Advance), SessionIntent::Advance);
        assert!(done.is_complete());
        let transition = done.reduce(SessionIntent::Tick);
        assert!(!transition.accepted);
        assert!(transition.events.is_empty());
    }

    fn player_intents() -> Vec<SessionIntent> {
        vec![
            SessionIntent::SelectAnswer {
                question_id: QuestionId::new("q1"),
                word: "fast".into(),
                blank_index: 0,
            },
            SessionIntent::SelectAnswer {
                question_id: QuestionId::new("q1"),
                word: String::new(),
                blank_index: 0,
            },
            SessionIntent::PlaceOption { option_index: 0 },
            SessionIntent::UseHint,
            SessionIntent::Advance,
            SessionIntent::Tick,
        ]
    }

    fn assert_inert(state: &SessionState) {
        for intent in player_intents() {
            let transition = state.clone().reduce(intent.clone());
            assert!(!transition.accepted, "{intent:?} was accepted");
            assert!(transition.events.is_empty(), "{intent:?} emitted events");
            assert_eq!(&transition.state, state, "{intent:?} changed the state");
        }
    }

    #[test]
    fn player_intents_are_ignored_while_pending() {
        assert_inert(&SessionState::default());
    }

    #[test]
    fn player_intents_are_ignored_after_failed_load() {
        let failed = apply(
            SessionState::default(),
            SessionIntent::LoadFailed("offline".into()),
        );
        assert_eq!(failed.load_status().error(), Some("offline"));
        assert_inert(&failed);
    }

    #[test]
    fn player_intents_are_ignored_once_complete() {
        let state = select(ready(), "q1", "fast", 0);
        let done = apply(apply(state, SessionIntent::Advance), SessionIntent::Advance);
        assert!(done.is_complete());
        assert_inert(&done);
    }

    #[test]
    fn reset_is_total() {
        let state = select(ready(), "q1", "fast", 0);
        let state = apply(state, SessionIntent::UseHint);
        let state = apply(state, SessionIntent::Advance);
        let state = apply(state, SessionIntent::Advance);
        assert!(state.is_complete());

        let transition = state.reduce(SessionIntent::Reset);
        let state = transition.state;
        assert!(state.questions().is_empty());
        assert!(state.answers().is_empty());
        assert_eq!(state.current_index(), 0);
        assert!(!state.is_complete());
        assert_eq!(state.load_status(), &LoadStatus::Pending);
        assert!(!state.hint_used());
        assert_eq!(transition.events, vec![SessionEvent::Reset]);
    }

    #[test]
    fn place_option_fills_next_empty_blank_once() {
        let state = apply(ready(), SessionIntent::PlaceOption { option_index: 2 });
        assert_eq!(state.current_answer().unwrap().selection(0), Some("slow"));
        assert_eq!(state.next_empty_blank(), Some(1));

        let transition = state.reduce(SessionIntent::PlaceOption { option_index: 2 });
        assert!(!transition.accepted);

        let state = apply(transition.state, SessionIntent::PlaceOption { option_index: 3 });
        assert_eq!(state.next_empty_blank(), None);
        assert!(state.can_advance());

        let transition = state.reduce(SessionIntent::PlaceOption { option_index: 0 });
        assert!(!transition.accepted);
    }

    #[test]
    fn used_words_reflect_current_selections() {
        let state = select(ready(), "q1", "bike", 1);
        assert!(state.is_word_used("bike"));
        assert!(!state.is_word_used("fast"));
        assert_eq!(state.used_words().into_iter().collect::<Vec<_>>(), vec!["bike"]);
        assert_eq!(state.filled_count(), 1);
        assert_eq!(state.total_blanks(), 2);
    }

    #[test]
    fn hints_follow_the_next_empty_blank() {
        let state = ready();
        assert_eq!(state.hint(), Some(Hint::FirstWord("fast".into())));

        let state = select(state, "q1", "bike", 0);
        assert_eq!(state.hint(), Some(Hint::NextWord("car".into())));

        let state = select(state, "q1", "slow", 1);
        assert_eq!(state.hint(), Some(Hint::Rearrange));

        assert!(!state.hint_used());
        let state = apply(state, SessionIntent::UseHint);
        assert!(state.hint_used());
    }

    #[test]
    fn warning_fires_once_when_crossing_threshold() {
        let config = SessionConfig {
            time_limit_secs: 12,
            warning_threshold_secs: 10,
        };
        let mut state = apply(
            SessionState::new(config),
            SessionIntent::LoadSucceeded(two_question_set()),
        );
        let mut warnings = 0;
        for _ in 0..5 {
            let transition = state.reduce(SessionIntent::Tick);
            warnings += transition
                .events
                .iter()
                .filter(|e| matches!(e, SessionEvent::TimerWarning { .. }))
                .count();
            state = transition.state;
        }
        assert_eq!(warnings, 1);
        assert_eq!(state.time_remaining(), 7);
    }

    #[test]
    fn progress_and_summary() {
        let state = select(ready(), "q1", "fast", 0);
        let state = select(state, "q1", "car", 1);
        let progress = state.progress();
        assert_eq!(progress.position, 1);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.percent_complete, 50);
        assert!(QuizSummary::from_state(&state, None, None).is_none());

        let state = apply(state, SessionIntent::Advance);
        let state = apply(state, SessionIntent::Advance);
        let summary = QuizSummary::from_state(&state, None, None).unwrap();
        assert_eq!(summary.score(), Score { correct: 1, total: 2 });
        assert!(summary.items()[0].is_correct);
        assert!(!summary.items()[1].answered);
        assert_eq!(
            summary.share_text(),
            "I scored 1 out of 2 (50%) on the Sentence Construction Quiz!"
        );
    }

    #[test]
    fn percent_complete_rounds_half_up() {
        let set = QuestionSet::new(vec![
            question("a", &["x"], &["x"]),
            question("b", &["y"], &["y"]),
            question("c", &["z"], &["z"]),
        ])
        .unwrap();
        let state = apply(SessionState::default(), SessionIntent::LoadSucceeded(set));
        assert_eq!(state.progress().percent_complete, 33);

        let state = apply(state, SessionIntent::Advance);
        assert_eq!(state.progress().position, 2);
        assert_eq!(state.progress().answered, 0);
        assert_eq!(state.progress().percent_complete, 67);
    }
}
