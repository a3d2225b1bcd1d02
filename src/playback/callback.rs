//! Playback callback — runs on the cpal audio thread.
//!
//! Drains commands from the ring buffer and fills the output with the current
//! sound, wrapping to the start when looping. Replaced sounds are handed back
//! to the main thread so the callback never frees memory.

use ringbuf::traits::{Consumer, Producer};
use ringbuf::{HeapCons, HeapProd};

use super::command::PlaybackCommand;

/// State that lives on the audio thread. Accessed only from the cpal callback.
pub struct PlaybackCallback {
    consumer: HeapCons<PlaybackCommand>,
    retired: HeapProd<Vec<f32>>,
    sound: Vec<f32>,
    read_pos: usize,
    looping: bool,
    volume: f32,
}

impl PlaybackCallback {
    /// `retired` receives each sound buffer a new `Play` replaces.
    pub fn new(consumer: HeapCons<PlaybackCommand>, retired: HeapProd<Vec<f32>>) -> Self {
        Self {
            consumer,
            retired,
            sound: Vec::new(),
            read_pos: 0,
            looping: false,
            volume: 1.0,
        }
    }

    /// Called by cpal for each output block.
    pub fn process(&mut self, output: &mut [f32]) {
        while let Some(cmd) = self.consumer.try_pop() {
            match cmd {
                PlaybackCommand::Play { samples, looping } => {
                    let old = std::mem::replace(&mut self.sound, samples);
                    // Only dropped here if the main thread stopped draining.
                    let _ = self.retired.try_push(old);
                    self.read_pos = 0;
                    self.looping = looping;
                }
                PlaybackCommand::SetVolume(v) => {
                    self.volume = v.clamp(0.0, 1.0);
                }
                PlaybackCommand::Stop => {
                    self.sound.clear();
                    self.read_pos = 0;
                    self.looping = false;
                }
            }
        }

        let mut written = 0;
        while written < output.len() {
            let available = self.sound.len() - self.read_pos;
            if available == 0 {
                if self.looping && !self.sound.is_empty() {
                    self.read_pos = 0;
                    continue;
                }
                break;
            }
            let n = (output.len() - written).min(available);
            for (out, &src) in output[written..written + n]
                .iter_mut()
                .zip(&self.sound[self.read_pos..self.read_pos + n])
            {
                *out = src * self.volume;
            }
            written += n;
            self.read_pos += n;
        }

        // Silence once the sound has finished.
        for sample in output[written..].iter_mut() {
            *sample = 0.0;
        }
    }
}
