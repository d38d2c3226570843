use thiserror::Error;

/// User preferences kept outside of any quiz attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    sound_enabled: bool,
    dark_mode: bool,
}

/// Partial update; `None` keeps the current value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreferencesDraft {
    pub sound_enabled: Option<bool>,
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error("invalid persisted flag for {field}: {value}")]
    InvalidFlag { field: &'static str, value: i64 },
}

impl PreferencesDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the draft on top of `base`.
    #[must_use]
    pub fn apply_to(self, base: Preferences) -> Preferences {
        Preferences {
            sound_enabled: self.sound_enabled.unwrap_or(base.sound_enabled),
            dark_mode: self.dark_mode.unwrap_or(base.dark_mode),
        }
    }
}

impl Preferences {
    #[must_use]
    pub fn new(sound_enabled: bool, dark_mode: bool) -> Self {
        Self {
            sound_enabled,
            dark_mode,
        }
    }

    /// Rehydrate from integer flags as stored by SQL backends.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::InvalidFlag` for values other than 0 or 1.
    pub fn from_persisted(sound_enabled: i64, dark_mode: i64) -> Result<Self, PreferencesError> {
        Ok(Self {
            sound_enabled: flag("sound_enabled", sound_enabled)?,
            dark_mode: flag("dark_mode", dark_mode)?,
        })
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn with_sound_toggled(self) -> Self {
        Self {
            sound_enabled: !self.sound_enabled,
            ..self
        }
    }

    #[must_use]
    pub fn with_dark_mode_toggled(self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
            ..self
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            dark_mode: false,
        }
    }
}

fn flag(field: &'static str, value: i64) -> Result<bool, PreferencesError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(PreferencesError::InvalidFlag { field, value }),
    }
}
