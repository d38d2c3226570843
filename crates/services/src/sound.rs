//! Sound cues: the notifier seam used by the quiz service and the player behind it.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quiz_core::model::SoundEvent;

use crate::error::SoundError;

/// Fire-and-forget sink for sound cues. Implementations must not panic or block.
pub trait SoundNotifier: Send + Sync {
    fn notify(&self, event: SoundEvent);
}

/// Notifier that drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNotifier;

impl SoundNotifier for SilentNotifier {
    fn notify(&self, _event: SoundEvent) {}
}

/// Platform audio output.
pub trait AudioBackend: Send + Sync {
    /// Warm up a source so the first playback is quick.
    ///
    /// # Errors
    ///
    /// Returns `SoundError` if the source cannot be prepared.
    fn preload(&self, _source: &str) -> Result<(), SoundError> {
        Ok(())
    }

    /// Start playing a source from the beginning.
    ///
    /// # Errors
    ///
    /// Returns `SoundError` if playback cannot start.
    fn play(&self, source: &str) -> Result<(), SoundError>;

    /// Drop any cached resources.
    fn release(&self) {}
}

/// Where a cue is played from, with an optional second source tried on failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundSource {
    pub primary: String,
    pub fallback: Option<String>,
}

impl SoundSource {
    #[must_use]
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Maps each cue to its sources.
#[derive(Clone, Debug, Default)]
pub struct SoundCatalog {
    sources: HashMap<SoundEvent, SoundSource>,
}

impl SoundCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Hosted preview sounds with a second host as fallback.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with(
                SoundEvent::Correct,
                SoundSource::new(
                    "https://assets.mixkit.co/sfx/preview/mixkit-correct-answer-tone-2870.mp3",
                )
                .with_fallback("https://soundbible.com/mp3/ding-sound-effect_2-mp3cut.mp3"),
            )
            .with(
                SoundEvent::Incorrect,
                SoundSource::new(
                    "https://assets.mixkit.co/sfx/preview/mixkit-wrong-answer-fail-notification-946.mp3",
                )
                .with_fallback("https://soundbible.com/mp3/buzz-sound-effect.mp3"),
            )
            .with(
                SoundEvent::ButtonClick,
                SoundSource::new("https://assets.mixkit.co/sfx/preview/mixkit-select-click-1109.mp3")
                    .with_fallback(
                        "https://soundbible.com/mp3/Click-SoundBible.com-1387633738.mp3",
                    ),
            )
            .with(
                SoundEvent::Complete,
                SoundSource::new(
                    "https://assets.mixkit.co/sfx/preview/mixkit-achievement-bell-600.mp3",
                )
                .with_fallback("https://soundbible.com/mp3/service-bell_daniel_simion.mp3"),
            )
            .with(
                SoundEvent::TimerWarning,
                SoundSource::new(
                    "https://assets.mixkit.co/sfx/preview/mixkit-alarm-digital-clock-beep-989.mp3",
                )
                .with_fallback("https://soundbible.com/mp3/sms-alert-5-daniel_simon.mp3"),
            )
    }

    #[must_use]
    pub fn with(mut self, event: SoundEvent, source: SoundSource) -> Self {
        self.sources.insert(event, source);
        self
    }

    #[must_use]
    pub fn get(&self, event: SoundEvent) -> Option<&SoundSource> {
        self.sources.get(&event)
    }
}

/// Explicitly owned sound service.
///
/// Cues are dropped until [`SoundPlayer::init`] runs and after [`SoundPlayer::dispose`],
/// and while sound is disabled. Backend failures are logged and swallowed.
pub struct SoundPlayer {
    backend: Arc<dyn AudioBackend>,
    catalog: SoundCatalog,
    enabled: AtomicBool,
    active: AtomicBool,
}

impl SoundPlayer {
    #[must_use]
    pub fn new(backend: Arc<dyn AudioBackend>, catalog: SoundCatalog) -> Self {
        Self {
            backend,
            catalog,
            enabled: AtomicBool::new(true),
            active: AtomicBool::new(false),
        }
    }

    /// Preload every cataloged source and start accepting cues.
    pub fn init(&self) {
        for event in SoundEvent::ALL {
            let Some(source) = self.catalog.get(event) else {
                continue;
            };
            let sources = std::iter::once(&source.primary).chain(source.fallback.as_ref());
            for src in sources {
                if let Err(err) = self.backend.preload(src) {
                    tracing::warn!(sound = %event, error = %err, "failed to preload sound");
                }
            }
        }
        self.active.store(true, Ordering::Release);
    }

    /// Stop accepting cues and release backend resources.
    pub fn dispose(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            self.backend.release();
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl SoundNotifier for SoundPlayer {
    fn notify(&self, event: SoundEvent) {
        if !self.is_enabled() || !self.is_active() {
            return;
        }
        let Some(source) = self.catalog.get(event) else {
            tracing::trace!(sound = %event, "no source for sound");
            return;
        };

        let Err(err) = self.backend.play(&source.primary) else {
            return;
        };
        tracing::warn!(sound = %event, error = %err, "error playing sound");

        if let Some(fallback) = &source.fallback {
            if let Err(err) = self.backend.play(fallback) {
                tracing::warn!(sound = %event, error = %err, "fallback sound also failed");
            }
        }
    }
}

impl Drop for SoundPlayer {
    fn drop(&mut self) {
        self.dispose();
    }
}
