mod answer;
mod hint;
mod ids;
mod preferences;
mod question;
mod session;
mod sound;
mod summary;
mod timer;

pub use answer::Answer;
pub use hint::Hint;
pub use ids::QuestionId;
pub use preferences::{Preferences, PreferencesDraft, PreferencesError};
pub use question::{BLANK_MARKER, Question, QuestionError, QuestionSet, QuestionSetError};
pub use session::{
    LoadStatus, SessionConfig, SessionEvent, SessionIntent, SessionProgress, SessionState,
    Transition,
};
pub use sound::SoundEvent;
pub use summary::{QuizSummary, ReviewItem, Score, ScoreBand};
pub use timer::{TimerBand, TimerView, format_clock};
