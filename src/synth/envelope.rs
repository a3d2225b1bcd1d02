//! Linear fade envelope applied to every rendered tone.

/// Fraction of a tone spent fading in, and again fading out.
pub const FADE_FRACTION: f64 = 0.1;

/// Symmetric linear fade-in / fade-out over a fixed number of frames.
///
/// The first `fade_frames` ramp from 0 toward 1, the last `fade_frames` ramp
/// from 1 back toward 0, and everything in between has unity gain. The fade
/// length is clamped to half the tone so the ramps never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeEnvelope {
    frame_count: usize,
    fade_frames: usize,
}

impl FadeEnvelope {
    /// Envelope for a tone of `frame_count` frames.
    pub fn new(frame_count: usize) -> Self {
        let fade = (frame_count as f64 * FADE_FRACTION).round() as usize;
        Self {
            frame_count,
            fade_frames: fade.min(frame_count / 2),
        }
    }

    /// Gain at frame `i`, in `[0.0, 1.0]`.
    ///
    /// `gain(k) == gain(frame_count - 1 - k)` for every `k`.
    pub fn gain(&self, i: usize) -> f64 {
        if self.fade_frames == 0 || i >= self.frame_count {
            return if i < self.frame_count { 1.0 } else { 0.0 };
        }
        let fade = self.fade_frames as f64;
        if i < self.fade_frames {
            i as f64 / fade
        } else if i >= self.frame_count - self.fade_frames {
            (self.frame_count - 1 - i) as f64 / fade
        } else {
            1.0
        }
    }

    /// Length of each ramp in frames.
    pub fn fade_frames(&self) -> usize {
        self.fade_frames
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}
