//! Alarm sound — reuse the cached WAV or render the melody and cache it.
//!
//! A cached WAV is only trusted alongside a stamp file recording the settings
//! and resolved steps it was rendered from. Editing the melody, the note table
//! or the render settings therefore invalidates the cache.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{AlarmConfig, ConfigError};
use crate::melody::{Melody, RenderSettings};
use crate::synth::{rendered_frames, Rendered, SampleBuffer, SynthCapability, Synthesizer};
use crate::wav;

/// Where a prepared sound came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSource {
    /// Read back from the configured sound file.
    Cached,
    /// Freshly synthesized.
    Rendered,
    /// Silent stand-in; synthesis unavailable.
    Placeholder,
}

/// The sound the alarm will play.
#[derive(Debug, Clone)]
pub struct AlarmSound {
    pub buffer: SampleBuffer,
    pub source: SoundSource,
}

impl AlarmSound {
    /// Load `config.sound_path` if it holds a WAV rendered from the current
    /// settings, otherwise render the configured melody and write it there.
    ///
    /// A stale or undecodable cache is re-rendered. A failed write is logged
    /// and the in-memory sound is still returned. Placeholders are never cached.
    pub fn prepare(
        config: &AlarmConfig,
        capability: SynthCapability,
    ) -> Result<Self, ConfigError> {
        let melody = config.validate()?;
        let stamp = CacheStamp::new(&config.render, &melody);

        let frames = rendered_frames(melody.steps(), &config.render);
        if let Some(buffer) = read_cache(&config.sound_path, &stamp, frames) {
            return Ok(Self {
                buffer,
                source: SoundSource::Cached,
            });
        }

        let sound = Self::from_melody(config, &melody, capability)?;
        if sound.source == SoundSource::Rendered {
            write_cache(&config.sound_path, &sound.buffer, &stamp);
        }
        Ok(sound)
    }

    /// Render the configured melody without touching the filesystem.
    pub fn render(
        config: &AlarmConfig,
        capability: SynthCapability,
    ) -> Result<Self, ConfigError> {
        let melody = config.validate()?;
        Self::from_melody(config, &melody, capability)
    }

    fn from_melody(
        config: &AlarmConfig,
        melody: &Melody,
        capability: SynthCapability,
    ) -> Result<Self, ConfigError> {
        let synth = Synthesizer::with_capability(capability, config.render.clone())?;
        let sound = match synth.render(melody) {
            Rendered::Audio(buffer) => Self {
                buffer,
                source: SoundSource::Rendered,
            },
            Rendered::Placeholder(buffer) => Self {
                buffer,
                source: SoundSource::Placeholder,
            },
        };
        info!(
            seconds = sound.buffer.duration_secs(),
            source = ?sound.source,
            "alarm sound ready"
        );
        Ok(sound)
    }
}

/// What a cached WAV was rendered from.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct CacheStamp {
    render: RenderSettings,
    /// `(hz, seconds)` per step, after note-name resolution.
    steps: Vec<(f64, f64)>,
}

impl CacheStamp {
    fn new(render: &RenderSettings, melody: &Melody) -> Self {
        Self {
            render: render.clone(),
            steps: melody
                .steps()
                .iter()
                .map(|s| (s.frequency_hz(), s.duration_secs()))
                .collect(),
        }
    }
}

/// `alarm_sound.wav` → `alarm_sound.wav.stamp.yaml`.
fn stamp_path(sound_path: &Path) -> PathBuf {
    let mut name = sound_path.as_os_str().to_owned();
    name.push(".stamp.yaml");
    PathBuf::from(name)
}

fn read_stamp(sound_path: &Path) -> Option<CacheStamp> {
    let content = fs::read_to_string(stamp_path(sound_path)).ok()?;
    serde_yaml::from_str(&content).ok()
}

fn write_stamp(sound_path: &Path, stamp: &CacheStamp) -> Result<(), ConfigError> {
    fs::write(stamp_path(sound_path), serde_yaml::to_string(stamp)?)?;
    Ok(())
}

/// Write the WAV, then its stamp. Failures are logged, not returned.
fn write_cache(path: &Path, buffer: &SampleBuffer, stamp: &CacheStamp) {
    if let Err(e) = wav::write_wav(path, buffer) {
        warn!(path = %path.display(), error = %e, "could not cache alarm sound");
        return;
    }
    if let Err(e) = write_stamp(path, stamp) {
        warn!(path = %path.display(), error = %e, "could not stamp cached alarm sound");
    }
}

fn read_cache(path: &Path, stamp: &CacheStamp, frames: usize) -> Option<SampleBuffer> {
    if !path.exists() {
        return None;
    }
    if read_stamp(path).as_ref() != Some(stamp) {
        info!(path = %path.display(), "alarm settings changed, re-rendering");
        return None;
    }
    match wav::read_wav(path) {
        Ok(buffer)
            if buffer.sample_rate() == stamp.render.sample_rate
                && buffer.len() == frames
                && frames > 0 =>
        {
            info!(path = %path.display(), "using cached alarm sound");
            Some(buffer)
        }
        Ok(_) => {
            warn!(path = %path.display(), "cached alarm sound does not match, re-rendering");
            None
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "cached alarm sound unreadable, re-rendering"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::melody::ScoreEntry;

    fn short_config(dir: &Path) -> AlarmConfig {
        let mut config = AlarmConfig {
            sound_path: dir.join("alarm_sound.wav"),
            melody: vec![ScoreEntry::new("G4", 0.1), ScoreEntry::new("A4", 0.1)],
            ..Default::default()
        };
        config.render.repeat_count = 1;
        config
    }

    #[test]
    fn renders_and_caches_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_config(dir.path());

        let sound = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(sound.source, SoundSource::Rendered);
        // 2205 + 2205 pause + 2205
        assert_eq!(sound.buffer.len(), 6615);
        assert!(config.sound_path.exists());
    }

    #[test]
    fn second_prepare_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_config(dir.path());

        let first = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        let second = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(second.source, SoundSource::Cached);
        assert_eq!(second.buffer, first.buffer);
    }

    #[test]
    fn changed_melody_is_re_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = short_config(dir.path());
        config.melody = vec![ScoreEntry::new("C4", 0.2)];
        let first = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(first.buffer.len(), 4410);

        config.melody = vec![ScoreEntry::new("C5", 1.0), ScoreEntry::new("G4", 1.0)];
        config.render.sample_rate = 44100;
        let second = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        let fresh = AlarmSound::render(&config, SynthCapability::Available).unwrap();
        assert_eq!(second.source, SoundSource::Rendered);
        assert_eq!(second.buffer.sample_rate(), 44100);
        // 44100 + 4410 pause + 44100
        assert_eq!(second.buffer.len(), 92610);
        assert_eq!(second.buffer, fresh.buffer);

        let third = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(third.source, SoundSource::Cached);
        assert_eq!(third.buffer, fresh.buffer);
    }

    #[test]
    fn changed_note_table_is_re_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = short_config(dir.path());
        let first = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();

        // Same names and durations, different pitch.
        config.notes.insert("G4".into(), 400.0);
        let second = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(second.source, SoundSource::Rendered);
        assert_eq!(second.buffer.len(), first.buffer.len());
        assert_ne!(second.buffer, first.buffer);
    }

    #[test]
    fn wav_without_stamp_is_re_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_config(dir.path());
        wav::write_wav(&config.sound_path, &SampleBuffer::from_samples(vec![7; 10], 22050))
            .unwrap();

        let sound = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(sound.source, SoundSource::Rendered);
        assert_eq!(sound.buffer.len(), 6615);
        assert!(stamp_path(&config.sound_path).exists());
    }

    #[test]
    fn replaced_wav_with_valid_stamp_is_re_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_config(dir.path());
        AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        wav::write_wav(&config.sound_path, &SampleBuffer::from_samples(vec![7; 10], 22050))
            .unwrap();

        let sound = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(sound.source, SoundSource::Rendered);
        assert_eq!(sound.buffer.len(), 6615);
    }

    #[test]
    fn stamp_sits_beside_sound() {
        assert_eq!(
            stamp_path(Path::new("/tmp/alarm_sound.wav")),
            PathBuf::from("/tmp/alarm_sound.wav.stamp.yaml")
        );
    }

    #[test]
    fn corrupt_cache_is_re_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_config(dir.path());
        std::fs::write(&config.sound_path, "# Placeholder alarm sound file").unwrap();

        let sound = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(sound.source, SoundSource::Rendered);
        assert!(wav::read_wav(&config.sound_path).is_ok());
    }

    #[test]
    fn placeholder_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_config(dir.path());

        let sound = AlarmSound::prepare(&config, SynthCapability::Unavailable).unwrap();
        assert_eq!(sound.source, SoundSource::Placeholder);
        assert!(sound.buffer.is_silent());
        assert!(!config.sound_path.exists());
        assert!(!stamp_path(&config.sound_path).exists());
    }

    #[test]
    fn unwritable_cache_still_returns_sound() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = short_config(dir.path());
        config.sound_path = dir.path().join("missing").join("alarm_sound.wav");

        let sound = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
        assert_eq!(sound.source, SoundSource::Rendered);
        assert!(!sound.buffer.is_empty());
    }

    #[test]
    fn invalid_melody_is_rejected_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = short_config(dir.path());
        config.melody.push(ScoreEntry::new("Z1", 0.1));

        assert!(AlarmSound::prepare(&config, SynthCapability::Available).is_err());
        assert!(!config.sound_path.exists());
    }
}
