//! Melodies — validated note sequences and the settings used to render them.
//!
//! A [`Melody`] is built once from symbolic `(name, duration)` pairs against a
//! [`NoteTable`]. Unknown names reject the whole melody before rendering
//! begins, so a typo never turns into a silently wrong alarm.

pub mod error;
pub mod note;

use serde::{Deserialize, Serialize};

pub use error::MelodyError;
pub use note::{NoteTable, REST_NAMES};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;
/// Default peak amplitude of a tone.
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

/// One note or rest: a frequency held for a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyStep {
    frequency_hz: f64,
    duration_secs: f64,
}

impl MelodyStep {
    /// Create a step. `frequency_hz` of `0.0` is a rest.
    pub fn new(frequency_hz: f64, duration_secs: f64) -> Result<Self, MelodyError> {
        if !frequency_hz.is_finite() || frequency_hz < 0.0 {
            return Err(MelodyError::InvalidFrequency(frequency_hz));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(MelodyError::InvalidDuration(duration_secs));
        }
        Ok(Self {
            frequency_hz,
            duration_secs,
        })
    }

    /// A rest of the given duration.
    pub fn rest(duration_secs: f64) -> Result<Self, MelodyError> {
        Self::new(0.0, duration_secs)
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Whether this step is silent.
    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0.0
    }
}

/// A symbolic melody entry as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub note: String,
    pub duration: f64,
}

impl ScoreEntry {
    pub fn new(note: impl Into<String>, duration: f64) -> Self {
        Self {
            note: note.into(),
            duration,
        }
    }
}

/// An ordered, non-empty sequence of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Melody {
    steps: Vec<MelodyStep>,
}

impl Melody {
    /// Build a melody from already-validated steps.
    pub fn new(steps: Vec<MelodyStep>) -> Result<Self, MelodyError> {
        if steps.is_empty() {
            return Err(MelodyError::Empty);
        }
        Ok(Self { steps })
    }

    /// Resolve symbolic `(name, duration)` pairs against `table`.
    ///
    /// Fails on the first unknown note name or invalid duration.
    pub fn from_notes(table: &NoteTable, notes: &[(&str, f64)]) -> Result<Self, MelodyError> {
        let steps = notes
            .iter()
            .map(|&(name, duration)| {
                let hz = table
                    .lookup(name)
                    .ok_or_else(|| MelodyError::UnknownNote(name.to_string()))?;
                MelodyStep::new(hz, duration)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(steps)
    }

    /// Resolve configuration entries against `table`.
    pub fn from_score(table: &NoteTable, score: &[ScoreEntry]) -> Result<Self, MelodyError> {
        let pairs: Vec<(&str, f64)> = score
            .iter()
            .map(|e| (e.note.as_str(), e.duration))
            .collect();
        Self::from_notes(table, &pairs)
    }

    pub fn steps(&self) -> &[MelodyStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed melody.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of step durations, excluding pauses.
    pub fn notes_duration_secs(&self) -> f64 {
        self.steps.iter().map(|s| s.duration_secs).sum()
    }
}

/// The cheerful wake-up tune ("jaa-go jaa-go subh ho gyi"): name, Hz, seconds.
const WAKE_UP: [(&str, f64, f64); 11] = [
    ("G4", 392.00, 0.5),
    ("A4", 440.00, 0.5),
    ("G4", 392.00, 0.5),
    ("A4", 440.00, 0.5),
    ("C5", 523.25, 1.0),
    ("B4", 493.88, 0.5),
    ("A4", 440.00, 1.0),
    ("G4", 392.00, 0.3),
    ("A4", 440.00, 0.3),
    ("B4", 493.88, 0.3),
    ("C5", 523.25, 1.5),
];

/// The wake-up tune as configuration entries.
pub fn wake_up_score() -> Vec<ScoreEntry> {
    WAKE_UP
        .iter()
        .map(|&(note, _, duration)| ScoreEntry::new(note, duration))
        .collect()
}

/// The wake-up tune as resolved steps.
pub fn wake_up_melody() -> Melody {
    let steps = WAKE_UP
        .iter()
        .map(|&(_, frequency_hz, duration_secs)| MelodyStep {
            frequency_hz,
            duration_secs,
        })
        .collect();
    Melody { steps }
}

/// Numeric parameters for rendering a melody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub sample_rate: u32,
    pub amplitude: f64,
    /// Silence between consecutive steps, in seconds.
    pub inter_note_pause: f64,
    /// Number of times the melody is played back to back.
    pub repeat_count: u32,
    /// Silence between repetitions, in seconds.
    pub inter_repeat_pause: f64,
}

impl RenderSettings {
    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), MelodyError> {
        if self.sample_rate == 0 {
            return Err(MelodyError::InvalidSampleRate(self.sample_rate));
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(MelodyError::InvalidAmplitude(self.amplitude));
        }
        for pause in [self.inter_note_pause, self.inter_repeat_pause] {
            if !pause.is_finite() || pause < 0.0 {
                return Err(MelodyError::InvalidPause(pause));
            }
        }
        if self.repeat_count == 0 {
            return Err(MelodyError::InvalidRepeatCount(self.repeat_count));
        }
        Ok(())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
            inter_note_pause: 0.1,
            repeat_count: 3,
            inter_repeat_pause: 0.5,
        }
    }
}
