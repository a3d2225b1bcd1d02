//! Clock face — current time and date formatted for display.

use chrono::NaiveDateTime;

/// Time and date strings for one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    /// `HH:MM:SS`, 24-hour.
    pub time: String,
    /// e.g. `Monday, October 19, 2026`.
    pub date: String,
}

impl ClockFace {
    pub fn new(now: &NaiveDateTime) -> Self {
        Self {
            time: now.format("%H:%M:%S").to_string(),
            date: now.format("%A, %B %d, %Y").to_string(),
        }
    }
}
