//! Synthesis capability — a feature-detection flag checked once at startup.

/// Whether tone synthesis is available in this build.
///
/// Builds without the `synth` feature still run; they produce a silent
/// placeholder instead of a melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthCapability {
    Available,
    Unavailable,
}

impl SynthCapability {
    /// Detect the capability of the running build.
    pub fn detect() -> Self {
        if cfg!(feature = "synth") {
            SynthCapability::Available
        } else {
            SynthCapability::Unavailable
        }
    }

    pub fn is_available(self) -> bool {
        self == SynthCapability::Available
    }
}
