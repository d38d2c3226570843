use std::fmt::Write as _;

use quiz_core::model::{
    BLANK_MARKER, LoadStatus, QuizSummary, SessionState, TimerBand, format_clock,
};

/// ANSI colors for the light and dark terminal themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: &'static str,
    pub filled: &'static str,
    pub muted: &'static str,
    pub good: &'static str,
    pub warn: &'static str,
    pub bad: &'static str,
}

const RESET: &str = "\x1b[0m";

impl Palette {
    pub const LIGHT: Palette = Palette {
        title: "\x1b[1;34m",
        filled: "\x1b[1;35m",
        muted: "\x1b[90m",
        good: "\x1b[32m",
        warn: "\x1b[33m",
        bad: "\x1b[31m",
    };

    pub const DARK: Palette = Palette {
        title: "\x1b[1;96m",
        filled: "\x1b[1;95m",
        muted: "\x1b[37m",
        good: "\x1b[92m",
        warn: "\x1b[93m",
        bad: "\x1b[91m",
    };

    #[must_use]
    pub fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }

    fn paint(self, color: &str, text: &str) -> String {
        format!("{color}{text}{RESET}")
    }

    fn timer(self, band: TimerBand) -> &'static str {
        match band {
            TimerBand::Calm => self.good,
            TimerBand::Caution => self.warn,
            TimerBand::Critical => self.bad,
        }
    }
}

/// Loading, error, question or nothing, depending on where the attempt is.
#[must_use]
pub fn render_state(state: &SessionState, loading: bool, palette: Palette) -> String {
    match state.load_status() {
        LoadStatus::Pending if loading => palette.paint(palette.muted, "Loading questions..."),
        LoadStatus::Pending => palette.paint(palette.muted, "No quiz loaded. Press r to load."),
        LoadStatus::Failed(message) => format!(
            "{}\n{}",
            palette.paint(palette.bad, &format!("Error: {message}")),
            palette.paint(palette.muted, "Press r to try again.")
        ),
        LoadStatus::Ready if state.is_complete() => String::new(),
        LoadStatus::Ready => render_question(state, palette),
    }
}

fn render_question(state: &SessionState, palette: Palette) -> String {
    let Some(question) = state.current_question() else {
        return String::new();
    };
    let progress = state.progress();
    let timer = state.timer();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}  {}",
        palette.paint(
            palette.title,
            &format!("Question {} of {}", progress.position, progress.total)
        ),
        palette.paint(palette.timer(timer.band()), &timer.label()),
        palette.paint(
            palette.muted,
            &format!("{}% complete", progress.percent_complete)
        ),
    );
    out.push('\n');

    let selections = state
        .current_answer()
        .map_or_else(|| vec![None; question.blank_count()], |a| a.selections().to_vec());
    let segments = question.segments();
    for (idx, segment) in segments.iter().enumerate() {
        out.push_str(segment);
        if idx + 1 == segments.len() {
            break;
        }
        match selections.get(idx).and_then(Option::as_deref) {
            Some(word) => out.push_str(&palette.paint(palette.filled, &format!("[{word}]"))),
            None => out.push_str(&palette.paint(palette.muted, BLANK_MARKER)),
        }
    }
    out.push_str("\n\n");

    for (idx, option) in question.options().iter().enumerate() {
        let line = format!("  {}. {option}", idx + 1);
        if state.is_word_used(option) {
            let _ = writeln!(out, "{}", palette.paint(palette.muted, &format!("{line} (used)")));
        } else {
            let _ = writeln!(out, "{line}");
        }
    }

    if state.hint_used() {
        if let Some(hint) = state.hint() {
            let _ = writeln!(out, "\n{}", palette.paint(palette.warn, &format!("Hint: {hint}")));
        }
    }

    let _ = write!(
        out,
        "\n{}",
        palette.paint(
            palette.muted,
            &format!(
                "{} of {} blanks filled. 1-9 place, c <n> clear, h hint, n next, r restart, q quit",
                state.filled_count(),
                state.total_blanks()
            )
        )
    );
    if state.can_advance() {
        out.push_str(&palette.paint(palette.good, "  [n] ready"));
    }
    out
}

#[must_use]
pub fn render_summary(summary: &QuizSummary, palette: Palette) -> String {
    let score = summary.score();
    let mut out = String::new();

    let _ = writeln!(out, "{}", palette.paint(palette.title, "Quiz complete"));
    let _ = writeln!(
        out,
        "Score: {}/{} ({}%)",
        score.correct,
        score.total,
        score.percent()
    );
    let _ = writeln!(out, "{}", summary.band().message());
    if let Some(duration) = summary.duration() {
        let secs = u32::try_from(duration.num_seconds().max(0)).unwrap_or(u32::MAX);
        let _ = writeln!(out, "Time taken: {}", format_clock(secs));
    }
    out.push('\n');

    for item in summary.items() {
        let (mark, color) = if item.is_correct {
            ("correct", palette.good)
        } else {
            ("incorrect", palette.bad)
        };
        let _ = writeln!(
            out,
            "{}. {}",
            item.position,
            palette.paint(color, mark)
        );
        if item.answered {
            let _ = writeln!(out, "   Your answer:    {}", item.your_sentence);
        } else {
            let _ = writeln!(out, "   Your answer:    {}", palette.paint(palette.muted, "no answer"));
        }
        if !item.is_correct {
            let _ = writeln!(out, "   Correct answer: {}", item.correct_sentence);
        }
    }

    let _ = write!(
        out,
        "\n{}\n{}",
        summary.share_text(),
        palette.paint(palette.muted, "r restart, q quit")
    );
    out
}
