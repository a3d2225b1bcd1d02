//! Tone and melody synthesis — deterministic rendering of melodies to PCM.
//!
//! [`render_tone`] and [`render_melody`] are pure functions: identical inputs
//! always produce identical samples. [`Synthesizer`] wraps them with validated
//! settings and the startup [`SynthCapability`] check, returning a silent
//! placeholder when synthesis is unavailable instead of failing.

pub mod buffer;
pub mod capability;
pub mod envelope;

use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::melody::{Melody, MelodyError, MelodyStep, RenderSettings, DEFAULT_AMPLITUDE};

pub use buffer::SampleBuffer;
pub use capability::SynthCapability;
pub use envelope::FadeEnvelope;

/// Full-scale value used to convert `[-1.0, 1.0]` to 16-bit samples.
const FULL_SCALE: f64 = 32767.0;

/// Length of the placeholder produced when synthesis is unavailable.
pub const PLACEHOLDER_SECS: f64 = 0.1;

/// Number of frames covering `duration_secs` at `sample_rate`, rounded.
pub fn frame_count(duration_secs: f64, sample_rate: u32) -> usize {
    let frames = (duration_secs * sample_rate as f64).round();
    if frames.is_finite() && frames > 0.0 {
        frames as usize
    } else {
        0
    }
}

/// Render one sine tone with a linear fade in and out.
///
/// Produces exactly `round(duration_secs * sample_rate)` samples. A
/// `frequency_hz` of `0.0` renders silence. Inputs are expected to be
/// validated by the caller (see [`MelodyStep::new`] and
/// [`RenderSettings::validate`]).
pub fn render_tone(
    frequency_hz: f64,
    duration_secs: f64,
    sample_rate: u32,
    amplitude: f64,
) -> Vec<i16> {
    debug_assert!(sample_rate > 0);
    debug_assert!((0.0..=1.0).contains(&amplitude));

    let frames = frame_count(duration_secs, sample_rate);
    if frequency_hz <= 0.0 {
        return vec![0; frames];
    }

    let envelope = FadeEnvelope::new(frames);
    let rate = sample_rate as f64;

    (0..frames)
        .map(|i| {
            let raw = amplitude * (2.0 * PI * frequency_hz * i as f64 / rate).sin();
            let scaled = (raw * envelope.gain(i) * FULL_SCALE).round();
            scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
        })
        .collect()
}

/// Render a sequence of steps at the default amplitude.
///
/// Steps within a pass are separated by `inter_note_pause_secs` of silence;
/// passes are separated by `inter_repeat_pause_secs`. Neither pause follows
/// the final step of the final pass.
pub fn render_melody(
    steps: &[MelodyStep],
    sample_rate: u32,
    inter_note_pause_secs: f64,
    repeat_count: u32,
    inter_repeat_pause_secs: f64,
) -> SampleBuffer {
    let settings = RenderSettings {
        sample_rate,
        amplitude: DEFAULT_AMPLITUDE,
        inter_note_pause: inter_note_pause_secs,
        repeat_count,
        inter_repeat_pause: inter_repeat_pause_secs,
    };
    render_steps(steps, &settings)
}

/// Total frames [`render_steps`] produces for `steps` under `settings`.
pub fn rendered_frames(steps: &[MelodyStep], settings: &RenderSettings) -> usize {
    let sr = settings.sample_rate;
    let notes: usize = steps
        .iter()
        .map(|s| frame_count(s.duration_secs(), sr))
        .sum();
    let gaps = steps.len().saturating_sub(1) * frame_count(settings.inter_note_pause, sr);
    let passes = settings.repeat_count as usize;
    passes * (notes + gaps)
        + passes.saturating_sub(1) * frame_count(settings.inter_repeat_pause, sr)
}

/// Render a sequence of steps with explicit settings.
pub fn render_steps(steps: &[MelodyStep], settings: &RenderSettings) -> SampleBuffer {
    let sr = settings.sample_rate;
    let mut out = SampleBuffer::with_capacity(sr, rendered_frames(steps, settings));
    let note_pause = render_tone(0.0, settings.inter_note_pause, sr, 0.0);
    let repeat_pause = render_tone(0.0, settings.inter_repeat_pause, sr, 0.0);

    for pass in 0..settings.repeat_count {
        if pass > 0 {
            out.extend_from_slice(&repeat_pause);
        }
        for (i, step) in steps.iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(&note_pause);
            }
            out.extend_from_slice(&render_tone(
                step.frequency_hz(),
                step.duration_secs(),
                sr,
                settings.amplitude,
            ));
        }
    }

    debug!(
        frames = out.len(),
        sample_rate = sr,
        passes = settings.repeat_count,
        "rendered melody"
    );
    out
}

/// Result of [`Synthesizer::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// The melody, fully synthesized.
    Audio(SampleBuffer),
    /// Silent stand-in produced when synthesis is unavailable.
    Placeholder(SampleBuffer),
}

impl Rendered {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Rendered::Placeholder(_))
    }

    pub fn buffer(&self) -> &SampleBuffer {
        match self {
            Rendered::Audio(b) | Rendered::Placeholder(b) => b,
        }
    }

    pub fn into_buffer(self) -> SampleBuffer {
        match self {
            Rendered::Audio(b) | Rendered::Placeholder(b) => b,
        }
    }
}

/// Validated render settings plus the startup capability flag.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    capability: SynthCapability,
    settings: RenderSettings,
}

impl Synthesizer {
    /// Create a synthesizer using the detected capability.
    pub fn new(settings: RenderSettings) -> Result<Self, MelodyError> {
        Self::with_capability(SynthCapability::detect(), settings)
    }

    /// Create a synthesizer with an explicit capability.
    pub fn with_capability(
        capability: SynthCapability,
        settings: RenderSettings,
    ) -> Result<Self, MelodyError> {
        settings.validate()?;
        Ok(Self {
            capability,
            settings,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn capability(&self) -> SynthCapability {
        self.capability
    }

    /// Render `melody`, or a silent placeholder if synthesis is unavailable.
    pub fn render(&self, melody: &Melody) -> Rendered {
        match self.capability {
            SynthCapability::Available => {
                Rendered::Audio(render_steps(melody.steps(), &self.settings))
            }
            SynthCapability::Unavailable => {
                warn!("tone synthesis unavailable, producing silent placeholder");
                Rendered::Placeholder(SampleBuffer::silence(
                    PLACEHOLDER_SECS,
                    self.settings.sample_rate,
                ))
            }
        }
    }
}
