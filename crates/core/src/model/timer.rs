/// Format seconds as `M:SS`.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Urgency of the countdown relative to the time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBand {
    /// At least 60% of the limit left.
    Calm,
    /// Between 30% and 60% left.
    Caution,
    /// Under 30% left.
    Critical,
}

/// Read-only projection of the per-question countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub remaining: u32,
    pub limit: u32,
}

impl TimerView {
    #[must_use]
    pub fn new(remaining: u32, limit: u32) -> Self {
        Self {
            remaining: remaining.min(limit),
            limit,
        }
    }

    /// Remaining share of the limit in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        f64::from(self.remaining) / f64::from(self.limit)
    }

    #[must_use]
    pub fn band(&self) -> TimerBand {
        let remaining = u64::from(self.remaining) * 10;
        let limit = u64::from(self.limit);
        if remaining < limit * 3 {
            TimerBand::Critical
        } else if remaining < limit * 6 {
            TimerBand::Caution
        } else {
            TimerBand::Calm
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        format_clock(self.remaining)
    }
}
