use std::sync::Arc;

use chrono::{DateTime, Utc};

use quiz_core::model::{
    QuestionId, QuestionSet, QuizSummary, SessionConfig, SessionEvent, SessionIntent,
    SessionState, SoundEvent,
};

use crate::Clock;
use crate::error::ProviderError;
use crate::provider::QuestionProvider;
use crate::sound::SoundNotifier;

/// Proof that a load was started for a given attempt.
///
/// Results carrying a ticket from an earlier attempt are discarded by
/// [`QuizService::finish_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Outcome of one service call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// False when the intent was ignored, or the load result was stale.
    pub accepted: bool,
    pub events: Vec<SessionEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    System,
}

/// Drives one quiz attempt: feeds intents to the session reducer and turns the
/// resulting events into sound cues and timestamps.
pub struct QuizService {
    state: SessionState,
    clock: Clock,
    sounds: Arc<dyn SoundNotifier>,
    generation: u64,
    loading: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizService {
    #[must_use]
    pub fn new(config: SessionConfig, sounds: Arc<dyn SoundNotifier>) -> Self {
        Self {
            state: SessionState::new(config),
            clock: Clock::default(),
            sounds,
            generation: 0,
            loading: false,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.state.config()
    }

    /// Attempt counter, bumped by every reset.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Summary of the attempt, available once it is complete.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        QuizSummary::from_state(&self.state, self.started_at, self.completed_at)
    }

    /// Mark a load as in flight.
    ///
    /// Returns `None` when a load is already running or the session is no longer pending.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.loading || !self.state.load_status().is_pending() {
            return None;
        }
        self.loading = true;
        tracing::debug!(generation = self.generation, "quiz load started");
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Apply a load result. Results from an attempt that has since been reset are dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<QuestionSet, ProviderError>,
    ) -> Dispatch {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale quiz load"
            );
            return Dispatch::default();
        }
        self.loading = false;

        let intent = match result {
            Ok(set) => SessionIntent::LoadSucceeded(set),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load quiz questions");
                SessionIntent::LoadFailed(err.to_string())
            }
        };
        self.dispatch(intent, Origin::System)
    }

    /// Fetch questions from `provider` and install them.
    pub async fn load(&mut self, provider: &dyn QuestionProvider) -> Dispatch {
        let Some(ticket) = self.begin_load() else {
            return Dispatch::default();
        };
        let result = provider.fetch_questions().await;
        self.finish_load(ticket, result)
    }

    pub fn select_answer(
        &mut self,
        question_id: QuestionId,
        word: impl Into<String>,
        blank_index: usize,
    ) -> Dispatch {
        self.dispatch(
            SessionIntent::SelectAnswer {
                question_id,
                word: word.into(),
                blank_index,
            },
            Origin::User,
        )
    }

    /// Clear one blank of the current question.
    pub fn clear_blank(&mut self, blank_index: usize) -> Dispatch {
        let Some(question_id) = self.state.current_question().map(|q| q.id().clone()) else {
            return Dispatch::default();
        };
        self.select_answer(question_id, String::new(), blank_index)
    }

    pub fn place_option(&mut self, option_index: usize) -> Dispatch {
        self.dispatch(SessionIntent::PlaceOption { option_index }, Origin::User)
    }

    pub fn advance(&mut self) -> Dispatch {
        self.dispatch(SessionIntent::Advance, Origin::User)
    }

    pub fn tick(&mut self) -> Dispatch {
        self.dispatch(SessionIntent::Tick, Origin::System)
    }

    pub fn use_hint(&mut self) -> Dispatch {
        self.dispatch(SessionIntent::UseHint, Origin::User)
    }

    /// Start a fresh attempt. Any load still in flight becomes stale.
    pub fn reset(&mut self) -> Dispatch {
        self.generation += 1;
        self.loading = false;
        self.started_at = None;
        self.completed_at = None;
        self.dispatch(SessionIntent::Reset, Origin::User)
    }

    fn dispatch(&mut self, intent: SessionIntent, origin: Origin) -> Dispatch {
        let transition = std::mem::take(&mut self.state).reduce(intent);
        self.state = transition.state;

        if transition.accepted && origin == Origin::User {
            self.sounds.notify(SoundEvent::ButtonClick);
        }
        for event in &transition.events {
            self.observe(event);
        }

        Dispatch {
            accepted: transition.accepted,
            events: transition.events,
        }
    }

    fn observe(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Loaded { questions } => {
                self.started_at = Some(self.clock.now());
                tracing::info!(questions, "quiz loaded");
            }
            SessionEvent::LoadFailed { message } => {
                tracing::info!(%message, "quiz unavailable");
            }
            SessionEvent::AnswerResolved {
                question_id,
                correct,
            } => {
                tracing::debug!(question = %question_id, correct, "answer resolved");
                self.sounds.notify(SoundEvent::for_resolution(*correct));
            }
            SessionEvent::TimerWarning { remaining } => {
                tracing::debug!(remaining, "time running out");
                self.sounds.notify(SoundEvent::TimerWarning);
            }
            SessionEvent::TimedOut { question_id } => {
                tracing::info!(question = %question_id, "question timed out");
            }
            SessionEvent::Completed => {
                let now = self.clock.now();
                self.completed_at = Some(now);
                let score = self.state.score();
                tracing::info!(
                    correct = score.correct,
                    total = score.total,
                    "quiz completed"
                );
                self.sounds.notify(SoundEvent::Complete);
            }
            SessionEvent::HintUsed { .. }
            | SessionEvent::Advanced { .. }
            | SessionEvent::Reset => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{LoadStatus, Question};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<SoundEvent>>);

    impl SoundNotifier for Recorder {
        fn notify(&self, event: SoundEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    impl Recorder {
        fn take(&self) -> Vec<SoundEvent> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    fn question_set() -> QuestionSet {
        let q = Question::new(
            QuestionId::from("q1"),
            "The _____________ sat on the _____________.",
            vec!["cat".into(), "mat".into(), "dog".into()],
            vec!["cat".into(), "mat".into()],
        )
        .unwrap();
        QuestionSet::new(vec![q]).unwrap()
    }

    fn service() -> (QuizService, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let service = QuizService::new(SessionConfig::default(), recorder.clone())
            .with_clock(Clock::fixed(quiz_core::time::fixed_now()));
        (service, recorder)
    }

    #[test]
    fn stale_ticket_is_discarded_after_reset() {
        let (mut service, _) = service();
        let ticket = service.begin_load().unwrap();
        assert!(service.begin_load().is_none());

        service.reset();
        let outcome = service.finish_load(ticket, Ok(question_set()));

        assert!(!outcome.accepted);
        assert_eq!(service.state().load_status(), &LoadStatus::Pending);
        assert!(!service.is_loading());
    }

    #[test]
    fn failed_load_records_message() {
        let (mut service, sounds) = service();
        let ticket = service.begin_load().unwrap();
        let err = ProviderError::Invalid(quiz_core::model::QuestionSetError::Empty);
        let outcome = service.finish_load(ticket, Err(err));

        assert!(outcome.accepted);
        assert!(matches!(service.state().load_status(), LoadStatus::Failed(_)));
        assert!(sounds.take().is_empty());
        assert!(service.begin_load().is_none());
    }

    #[test]
    fn user_actions_click_and_resolution_plays_result() {
        let (mut service, sounds) = service();
        let ticket = service.begin_load().unwrap();
        service.finish_load(ticket, Ok(question_set()));
        assert_eq!(service.started_at(), Some(quiz_core::time::fixed_now()));
        assert!(sounds.take().is_empty());

        service.place_option(0);
        assert_eq!(sounds.take(), vec![SoundEvent::ButtonClick]);

        service.place_option(1);
        assert_eq!(
            sounds.take(),
            vec![SoundEvent::ButtonClick, SoundEvent::Correct]
        );

        // already used: ignored, no click
        service.place_option(0);
        assert!(sounds.take().is_empty());

        service.advance();
        assert_eq!(
            sounds.take(),
            vec![SoundEvent::ButtonClick, SoundEvent::Complete]
        );
        let summary = service.summary().unwrap();
        assert_eq!(summary.score().correct, 1);
        assert_eq!(summary.completed_at(), Some(quiz_core::time::fixed_now()));
    }

    #[test]
    fn clear_blank_targets_current_question() {
        let (mut service, _) = service();
        let ticket = service.begin_load().unwrap();
        service.finish_load(ticket, Ok(question_set()));
        service.place_option(2);

        let outcome = service.clear_blank(0);
        assert!(outcome.accepted);
        assert_eq!(service.state().filled_count(), 0);
    }

    #[test]
    fn timeout_path_plays_no_click() {
        let (mut service, sounds) = service();
        let ticket = service.begin_load().unwrap();
        service.finish_load(ticket, Ok(question_set()));

        for _ in 0..SessionConfig::DEFAULT_TIME_LIMIT_SECS {
            service.tick();
        }

        assert!(service.state().is_complete());
        assert_eq!(
            sounds.take(),
            vec![SoundEvent::TimerWarning, SoundEvent::Complete]
        );
    }

    #[test]
    fn reset_clears_timestamps_and_allows_reload() {
        let (mut service, _) = service();
        let ticket = service.begin_load().unwrap();
        service.finish_load(ticket, Ok(question_set()));
        let before = service.generation();

        service.reset();

        assert_eq!(service.generation(), before + 1);
        assert!(service.started_at().is_none());
        assert!(service.begin_load().is_some());
    }
}
