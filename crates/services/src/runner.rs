//! Background task that owns a [`QuizService`] and drives its one-second countdown.
//!
//! The task is the only writer of the session. Front-ends talk to it through a
//! cloneable [`QuizHandle`] and observe it through [`QuizSnapshot`]s published on a
//! `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info};

use quiz_core::model::{QuestionId, QuestionSet, QuizSummary, SessionState};

use crate::error::{ProviderError, RunnerError};
use crate::provider::QuestionProvider;
use crate::quiz_service::{LoadTicket, QuizService};

/// Countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Point-in-time view of the running quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub state: SessionState,
    pub summary: Option<QuizSummary>,
    pub loading: bool,
    pub generation: u64,
}

impl QuizSnapshot {
    fn of(service: &QuizService) -> Self {
        Self {
            state: service.state().clone(),
            summary: service.summary(),
            loading: service.is_loading(),
            generation: service.generation(),
        }
    }
}

#[derive(Debug)]
enum Command {
    Load,
    SelectAnswer {
        question_id: QuestionId,
        word: String,
        blank_index: usize,
    },
    ClearBlank {
        blank_index: usize,
    },
    PlaceOption {
        option_index: usize,
    },
    Advance,
    UseHint,
    Reset,
    Shutdown,
}

struct Loaded {
    ticket: LoadTicket,
    result: Result<QuestionSet, ProviderError>,
}

/// The countdown restarts whenever any of these change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerKey {
    generation: u64,
    index: usize,
    running: bool,
}

impl TimerKey {
    fn of(service: &QuizService) -> Self {
        Self {
            generation: service.generation(),
            index: service.state().current_index(),
            running: service.state().is_running(),
        }
    }
}

/// Cloneable front for a spawned quiz task.
///
/// Dropping every handle stops the task.
#[derive(Clone)]
pub struct QuizHandle {
    commands: UnboundedSender<Command>,
    snapshots: watch::Receiver<QuizSnapshot>,
}

impl QuizHandle {
    fn send(&self, command: Command) -> Result<(), RunnerError> {
        self.commands.send(command).map_err(|_| RunnerError::Stopped)
    }

    /// Start fetching questions. Ignored while a load is in flight or after one finished.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has exited.
    pub fn load(&self) -> Result<(), RunnerError> {
        self.send(Command::Load)
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has exited.
    pub fn select_answer(
        &self,
        question_id: QuestionId,
        word: impl Into<String>,
        blank_index: usize,
    ) -> Result<(), RunnerError> {
        self.send(Command::SelectAnswer {
            question_id,
            word: word.into(),
            blank_index,
        })
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has exited.
    pub fn clear_blank(&self, blank_index: usize) -> Result<(), RunnerError> {
        self.send(Command::ClearBlank { blank_index })
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has exited.
    pub fn place_option(&self, option_index: usize) -> Result<(), RunnerError> {
        self.send(Command::PlaceOption { option_index })
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has exited.
    pub fn advance(&self) -> Result<(), RunnerError> {
        self.send(Command::Advance)
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has exited.
    pub fn use_hint(&self) -> Result<(), RunnerError> {
        self.send(Command::UseHint)
    }

    /// Reset the attempt. Does not reload; call [`QuizHandle::load`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has exited.
    pub fn reset(&self) -> Result<(), RunnerError> {
        self.send(Command::Reset)
    }

    /// Ask the task to exit.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Stopped` if the task has already exited.
    pub fn shutdown(&self) -> Result<(), RunnerError> {
        self.send(Command::Shutdown)
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.snapshots.borrow().clone()
    }

    /// New receiver that yields every subsequent snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.snapshots.clone()
    }
}

/// Spawns quiz tasks.
pub struct QuizRunner {
    provider: Arc<dyn QuestionProvider>,
    period: Duration,
}

impl QuizRunner {
    #[must_use]
    pub fn new(provider: Arc<dyn QuestionProvider>) -> Self {
        Self {
            provider,
            period: TICK_PERIOD,
        }
    }

    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Move `service` onto a new tokio task. Must be called inside a runtime.
    #[must_use]
    pub fn spawn(self, service: QuizService) -> (QuizHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(QuizSnapshot::of(&service));

        let task = tokio::spawn(run(
            service,
            self.provider,
            self.period,
            command_rx,
            snapshot_tx,
        ));

        let handle = QuizHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }
}

async fn run(
    mut service: QuizService,
    provider: Arc<dyn QuestionProvider>,
    period: Duration,
    mut commands: UnboundedReceiver<Command>,
    snapshots: watch::Sender<QuizSnapshot>,
) {
    let (loaded_tx, mut loaded_rx) = unbounded_channel::<Loaded>();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut timer_key = TimerKey::of(&service);

    info!("quiz runner started");
    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("all quiz handles dropped");
                    break;
                };
                if matches!(command, Command::Shutdown) {
                    break;
                }
                apply(&mut service, command, &provider, &loaded_tx);
            }
            Some(loaded) = loaded_rx.recv() => {
                service.finish_load(loaded.ticket, loaded.result);
            }
            _ = ticker.tick(), if service.state().is_running() => {
                service.tick();
            }
        }

        let key = TimerKey::of(&service);
        if key != timer_key {
            ticker.reset();
            timer_key = key;
        }
        snapshots.send_replace(QuizSnapshot::of(&service));
    }
    info!("quiz runner stopped");
}

fn apply(
    service: &mut QuizService,
    command: Command,
    provider: &Arc<dyn QuestionProvider>,
    loaded_tx: &UnboundedSender<Loaded>,
) {
    match command {
        Command::Load => {
            let Some(ticket) = service.begin_load() else {
                debug!("load ignored");
                return;
            };
            let provider = Arc::clone(provider);
            let loaded_tx = loaded_tx.clone();
            tokio::spawn(async move {
                let fetch = tokio::spawn(async move { provider.fetch_questions().await });
                let result = fetch.await.unwrap_or_else(|err| {
                    error!(error = %err, "quiz fetch task failed");
                    Err(ProviderError::Aborted(err.to_string()))
                });
                // receiver gone means the runner stopped
                let _ = loaded_tx.send(Loaded { ticket, result });
            });
        }
        Command::SelectAnswer {
            question_id,
            word,
            blank_index,
        } => {
            service.select_answer(question_id, word, blank_index);
        }
        Command::ClearBlank { blank_index } => {
            service.clear_blank(blank_index);
        }
        Command::PlaceOption { option_index } => {
            service.place_option(option_index);
        }
        Command::Advance => {
            service.advance();
        }
        Command::UseHint => {
            service.use_hint();
        }
        Command::Reset => {
            service.reset();
        }
        Command::Shutdown => {}
    }
}
