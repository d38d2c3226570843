//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionSetError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while fetching question data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("quiz data request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read quiz data: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed quiz data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid quiz data: {0}")]
    Invalid(#[from] QuestionSetError),
    #[error("quiz data fetch aborted: {0}")]
    Aborted(String),
}

/// Errors reported by audio backends. Never surfaced to the quiz session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SoundError {
    #[error("sound source unavailable: {0}")]
    Unavailable(String),
    #[error("audio backend failed: {0}")]
    Backend(String),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizHandle`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunnerError {
    #[error("quiz runner has stopped")]
    Stopped,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Preferences(#[from] PreferencesServiceError),
}
