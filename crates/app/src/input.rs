/// One line typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Place option `n` (0-based) into the next empty blank.
    Place(usize),
    /// Clear blank `n` (0-based).
    Clear(usize),
    Next,
    Hint,
    Restart,
    Quit,
    Help,
    Empty,
    Unknown(String),
}

impl Input {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Input::Empty;
        };
        let rest = parts.next();
        if parts.next().is_some() {
            return Input::Unknown(line.to_string());
        }

        match (head.to_ascii_lowercase().as_str(), rest) {
            ("n" | "next", None) => Input::Next,
            ("h" | "hint", None) => Input::Hint,
            ("r" | "restart", None) => Input::Restart,
            ("q" | "quit" | "exit", None) => Input::Quit,
            ("?" | "help", None) => Input::Help,
            ("c" | "clear", Some(n)) => match one_based(n) {
                Some(idx) => Input::Clear(idx),
                None => Input::Unknown(line.to_string()),
            },
            (n, None) => match one_based(n) {
                Some(idx) => Input::Place(idx),
                None => Input::Unknown(line.to_string()),
            },
            _ => Input::Unknown(line.to_string()),
        }
    }
}

fn one_based(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

pub const HELP: &str = "\
Commands:
  1..9      place that option into the next empty blank
  c <n>     clear blank n
  n         next question (once every blank is filled)
  h         show a hint
  r         restart the quiz
  q         quit";
