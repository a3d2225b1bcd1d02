//! Playback — hands a rendered sound to the audio device with start/stop/loop controls.
//!
//! [`AudioEngine`] owns the cpal output stream and talks to it through a
//! lock-free ring buffer: the main thread sends [`PlaybackCommand`]s, the audio
//! thread drains them in its callback. When no device is available the
//! application falls back to [`BellPlayer`].

pub mod callback;
pub mod command;
pub mod resample;

use std::io::Write;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Consumer, Producer, Split},
    HeapRb,
};
use tracing::warn;

use crate::synth::SampleBuffer;

pub use callback::PlaybackCallback;
pub use command::PlaybackCommand;
pub use resample::{resample_linear, to_device_frames};

/// Ring buffer capacity (number of commands).
const RING_BUFFER_CAPACITY: usize = 64;

/// Number of bells rung by [`BellPlayer`].
pub const BELL_COUNT: usize = 5;

/// Playback errors.
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to query device configuration.
    DeviceConfig(String),
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
    /// Ring buffer is full — audio thread is not draining fast enough.
    BufferFull,
    /// Writing the terminal bell failed.
    Bell(std::io::Error),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::DeviceConfig(e) => write!(f, "device config error: {e}"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
            AudioError::BufferFull => write!(f, "playback command ring buffer is full"),
            AudioError::Bell(e) => write!(f, "terminal bell error: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Something that can play a rendered sound.
pub trait Player {
    /// Start playing `sound` from the beginning, replacing anything playing.
    /// With `looping`, the sound repeats until [`stop`](Player::stop).
    fn start(&mut self, sound: &SampleBuffer, looping: bool) -> Result<(), AudioError>;

    /// Stop playback.
    fn stop(&mut self) -> Result<(), AudioError>;

    /// Set playback volume, 0.0 to 1.0. Ignored by players without volume control.
    fn set_volume(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Audio output on the default device. Owns the cpal stream and ring buffer producer.
pub struct AudioEngine {
    _stream: cpal::Stream,
    producer: ringbuf::HeapProd<PlaybackCommand>,
    /// Buffers the audio thread has finished with, freed here.
    retired: ringbuf::HeapCons<Vec<f32>>,
    sample_rate: u32,
    channels: u16,
}

impl AudioEngine {
    /// Open the default output device with its default configuration.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let rb = HeapRb::<PlaybackCommand>::new(RING_BUFFER_CAPACITY);
        let (producer, consumer) = rb.split();
        let (retired_producer, retired) = HeapRb::<Vec<f32>>::new(RING_BUFFER_CAPACITY).split();
        let mut callback = PlaybackCallback::new(consumer, retired_producer);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err: cpal::StreamError| {
            warn!("audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback.process(data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            producer,
            retired,
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    fn send(&mut self, cmd: PlaybackCommand) -> Result<(), AudioError> {
        self.retired.clear();
        self.producer
            .try_push(cmd)
            .map_err(|_| AudioError::BufferFull)
    }
}

impl Player for AudioEngine {
    fn start(&mut self, sound: &SampleBuffer, looping: bool) -> Result<(), AudioError> {
        let samples = to_device_frames(sound, self.sample_rate, self.channels);
        self.send(PlaybackCommand::Play { samples, looping })
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.send(PlaybackCommand::Stop)
    }

    /// Clamped to 0.0..=1.0 on the audio thread.
    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.send(PlaybackCommand::SetVolume(volume))
    }
}

/// Fallback player that rings the terminal bell.
pub struct BellPlayer<W: Write> {
    out: W,
}

impl BellPlayer<std::io::Stdout> {
    /// Ring the bell on stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> BellPlayer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Player for BellPlayer<W> {
    fn start(&mut self, _sound: &SampleBuffer, _looping: bool) -> Result<(), AudioError> {
        self.out
            .write_all(&[0x07; BELL_COUNT])
            .and_then(|_| self.out.flush())
            .map_err(AudioError::Bell)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Open the default audio device, falling back to the terminal bell.
pub fn open_player() -> Box<dyn Player> {
    match AudioEngine::new() {
        Ok(engine) => Box::new(engine),
        Err(e) => {
            warn!(error = %e, "no audio output, falling back to terminal bell");
            Box::new(BellPlayer::stdout())
        }
    }
}
