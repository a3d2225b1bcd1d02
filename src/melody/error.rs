//! Error types for melody construction and render settings.

use std::fmt;

/// A melody or its render settings failed validation.
///
/// Raised before any samples are produced; rendering itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum MelodyError {
    /// A note name that is not in the note table.
    UnknownNote(String),
    /// A melody with no steps.
    Empty,
    /// Step duration must be finite and greater than zero.
    InvalidDuration(f64),
    /// Step frequency must be finite and non-negative.
    InvalidFrequency(f64),
    /// Sample rate must be greater than zero.
    InvalidSampleRate(u32),
    /// Amplitude must lie in `[0.0, 1.0]`.
    InvalidAmplitude(f64),
    /// Pauses must be finite and non-negative.
    InvalidPause(f64),
    /// A melody must be played at least once.
    InvalidRepeatCount(u32),
}

impl fmt::Display for MelodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MelodyError::UnknownNote(name) => write!(f, "unknown note name: {name:?}"),
            MelodyError::Empty => write!(f, "melody has no steps"),
            MelodyError::InvalidDuration(d) => {
                write!(f, "step duration must be > 0 seconds, got {d}")
            }
            MelodyError::InvalidFrequency(hz) => {
                write!(f, "step frequency must be >= 0 Hz, got {hz}")
            }
            MelodyError::InvalidSampleRate(sr) => {
                write!(f, "sample rate must be > 0, got {sr}")
            }
            MelodyError::InvalidAmplitude(a) => {
                write!(f, "amplitude must be within 0.0..=1.0, got {a}")
            }
            MelodyError::InvalidPause(p) => write!(f, "pause must be >= 0 seconds, got {p}"),
            MelodyError::InvalidRepeatCount(n) => {
                write!(f, "repeat count must be at least 1, got {n}")
            }
        }
    }
}

impl std::error::Error for MelodyError {}
