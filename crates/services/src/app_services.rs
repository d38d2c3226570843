use std::sync::Arc;

use quiz_core::model::{Preferences, SessionConfig};
use storage::repository::Storage;
use tokio::task::JoinHandle;

use crate::Clock;
use crate::error::AppServicesError;
use crate::preferences_service::PreferencesService;
use crate::provider::QuestionProvider;
use crate::quiz_service::QuizService;
use crate::runner::{QuizHandle, QuizRunner};
use crate::sound::{AudioBackend, SoundCatalog, SoundNotifier, SoundPlayer};

/// Assembles app-facing services around one storage backend and one sound player.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    config: SessionConfig,
    preferences: Arc<PreferencesService>,
    sounds: Arc<SoundPlayer>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or loading preferences fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        audio: Arc<dyn AudioBackend>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, audio).await
    }

    /// Build services backed by in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if loading preferences fails.
    pub async fn in_memory(
        clock: Clock,
        audio: Arc<dyn AudioBackend>,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, audio).await
    }

    async fn from_storage(
        storage: Storage,
        clock: Clock,
        audio: Arc<dyn AudioBackend>,
    ) -> Result<Self, AppServicesError> {
        let preferences = Arc::new(PreferencesService::new(Arc::clone(&storage.preferences)));
        let current = preferences.load().await?;

        let sounds = Arc::new(SoundPlayer::new(audio, SoundCatalog::standard()));
        sounds.set_enabled(current.sound_enabled());
        sounds.init();

        Ok(Self {
            clock,
            config: SessionConfig::default(),
            preferences,
            sounds,
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn sounds(&self) -> Arc<SoundPlayer> {
        Arc::clone(&self.sounds)
    }

    /// Push persisted preferences into live services.
    pub fn apply_preferences(&self, preferences: &Preferences) {
        self.sounds.set_enabled(preferences.sound_enabled());
    }

    /// A fresh quiz session wired to the shared sound player.
    #[must_use]
    pub fn quiz_service(&self) -> QuizService {
        let sounds: Arc<dyn SoundNotifier> = self.sounds();
        QuizService::new(self.config, sounds).with_clock(self.clock)
    }

    /// Spawn a quiz task fed by `provider`. Must be called inside a tokio runtime.
    #[must_use]
    pub fn start_quiz(&self, provider: Arc<dyn QuestionProvider>) -> (QuizHandle, JoinHandle<()>) {
        QuizRunner::new(provider).spawn(self.quiz_service())
    }
}
