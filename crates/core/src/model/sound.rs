use std::fmt;

/// Named sound cues emitted while a quiz runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    ButtonClick,
    Correct,
    Incorrect,
    Complete,
    TimerWarning,
}

impl SoundEvent {
    pub const ALL: [SoundEvent; 5] = [
        SoundEvent::ButtonClick,
        SoundEvent::Correct,
        SoundEvent::Incorrect,
        SoundEvent::Complete,
        SoundEvent::TimerWarning,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SoundEvent::ButtonClick => "buttonClick",
            SoundEvent::Correct => "correct",
            SoundEvent::Incorrect => "incorrect",
            SoundEvent::Complete => "complete",
            SoundEvent::TimerWarning => "timerWarning",
        }
    }

    /// Cue for a fully filled answer.
    #[must_use]
    pub fn for_resolution(correct: bool) -> Self {
        if correct {
            SoundEvent::Correct
        } else {
            SoundEvent::Incorrect
        }
    }
}

impl fmt::Display for SoundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
