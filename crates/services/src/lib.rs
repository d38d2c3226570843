#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod preferences_service;
pub mod provider;
pub mod quiz_service;
pub mod runner;
pub mod sound;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, PreferencesServiceError, ProviderError, RunnerError, SoundError,
};
pub use preferences_service::PreferencesService;
pub use provider::{
    HttpQuestionProvider, JsonQuestionProvider, JsonSource, QuestionProvider, parse_quiz,
    provider_for,
};
pub use quiz_service::{Dispatch, LoadTicket, QuizService};
pub use runner::{QuizHandle, QuizRunner, QuizSnapshot, TICK_PERIOD};
pub use sound::{
    AudioBackend, SilentNotifier, SoundCatalog, SoundNotifier, SoundPlayer, SoundSource,
};
