use std::sync::Arc;

use quiz_core::model::{Preferences, PreferencesDraft};
use storage::repository::PreferencesRepository;

use crate::error::PreferencesServiceError;

#[derive(Clone)]
pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted preferences (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn load(&self) -> Result<Preferences, PreferencesServiceError> {
        let preferences = self.repo.get_preferences().await?;
        Ok(preferences.unwrap_or_default())
    }

    /// Apply a partial update on top of the stored preferences and persist it.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` if loading or persistence fails.
    pub async fn save(
        &self,
        draft: PreferencesDraft,
    ) -> Result<Preferences, PreferencesServiceError> {
        let current = self.load().await?;
        let next = draft.apply_to(current);
        self.repo.save_preferences(&next).await?;
        tracing::debug!(
            sound_enabled = next.sound_enabled(),
            dark_mode = next.dark_mode(),
            "preferences saved"
        );
        Ok(next)
    }

    /// Flip the sound flag and persist.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn toggle_sound(&self) -> Result<Preferences, PreferencesServiceError> {
        let current = self.load().await?;
        self.save(PreferencesDraft {
            sound_enabled: Some(!current.sound_enabled()),
            ..PreferencesDraft::new()
        })
        .await
    }

    /// Flip the dark mode flag and persist.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn toggle_dark_mode(&self) -> Result<Preferences, PreferencesServiceError> {
        let current = self.load().await?;
        self.save(PreferencesDraft {
            dark_mode: Some(!current.dark_mode()),
            ..PreferencesDraft::new()
        })
        .await
    }
}
