//! Alarm time of day — hour and minute, written `HH:MM`.

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Errors from parsing or constructing an [`AlarmTime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmTimeError {
    /// Input was not of the form `H:MM` / `HH:MM`.
    Malformed(String),
    HourOutOfRange(u32),
    MinuteOutOfRange(u32),
}

impl fmt::Display for AlarmTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmTimeError::Malformed(s) => write!(f, "expected HH:MM, got {s:?}"),
            AlarmTimeError::HourOutOfRange(h) => write!(f, "hour must be 0-23, got {h}"),
            AlarmTimeError::MinuteOutOfRange(m) => write!(f, "minute must be 0-59, got {m}"),
        }
    }
}

impl std::error::Error for AlarmTimeError {}

/// A time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

impl AlarmTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, AlarmTimeError> {
        if hour > 23 {
            return Err(AlarmTimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(AlarmTimeError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Whether `now` falls within this alarm's minute.
    pub fn matches<T: Timelike>(&self, now: &T) -> bool {
        now.hour() == self.hour as u32 && now.minute() == self.minute as u32
    }
}

impl Default for AlarmTime {
    /// 07:00.
    fn default() -> Self {
        Self { hour: 7, minute: 0 }
    }
}

impl FromStr for AlarmTime {
    type Err = AlarmTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AlarmTimeError::Malformed(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(malformed)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(malformed());
        }
        let hour: u32 = h.parse().map_err(|_| malformed())?;
        let minute: u32 = m.parse().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for AlarmTime {
    type Error = AlarmTimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AlarmTime> for String {
    fn from(t: AlarmTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
