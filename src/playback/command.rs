//! Commands sent from the main thread to the audio thread via ring buffer.

/// Commands sent from the main thread to the audio thread via ring buffer.
#[derive(Debug)]
pub enum PlaybackCommand {
    /// Replace whatever is playing with these interleaved device frames.
    Play { samples: Vec<f32>, looping: bool },

    /// Set playback volume (0.0 to 1.0).
    SetVolume(f32),

    /// Stop playback and clear the buffer.
    Stop,
}
