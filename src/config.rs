//! Configuration — alarm time, sound file and melody loaded from ~/.alarm-chime/config.yaml.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alarm::AlarmTime;
use crate::melody::{wake_up_score, Melody, MelodyError, NoteTable, RenderSettings, ScoreEntry};

/// Errors from loading, saving or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_yaml::Error),
    /// Melody or render settings rejected.
    Melody(MelodyError),
    /// Volume outside `0.0..=1.0`.
    InvalidVolume(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Melody(e) => write!(f, "invalid melody: {e}"),
            ConfigError::InvalidVolume(v) => {
                write!(f, "volume must be within 0.0..=1.0, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<MelodyError> for ConfigError {
    fn from(e: MelodyError) -> Self {
        ConfigError::Melody(e)
    }
}

/// Alarm configuration. Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Time the `watch` command arms when none is given.
    pub alarm_time: AlarmTime,
    /// Where the rendered melody is cached.
    pub sound_path: PathBuf,
    /// Playback volume, 0.0 to 1.0.
    pub volume: f32,
    pub render: RenderSettings,
    /// Extra notes added to the built-in major scale.
    pub notes: BTreeMap<String, f64>,
    pub melody: Vec<ScoreEntry>,
}

impl AlarmConfig {
    /// Default config path: `~/.alarm-chime/config.yaml`.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".alarm-chime");
        path.push("config.yaml");
        path
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// The built-in major scale extended with configured notes.
    pub fn note_table(&self) -> NoteTable {
        let mut table = NoteTable::major_scale();
        for (name, &hz) in &self.notes {
            table.insert(name.clone(), hz);
        }
        table
    }

    /// Resolve the configured melody. Unknown note names are rejected here.
    pub fn melody(&self) -> Result<Melody, MelodyError> {
        Melody::from_score(&self.note_table(), &self.melody)
    }

    /// Check every field; builds the melody to surface bad note names early.
    pub fn validate(&self) -> Result<Melody, ConfigError> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::InvalidVolume(self.volume));
        }
        self.render.validate()?;
        Ok(self.melody()?)
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            alarm_time: AlarmTime::default(),
            sound_path: PathBuf::from("alarm_sound.wav"),
            volume: 1.0,
            render: RenderSettings::default(),
            notes: BTreeMap::new(),
            melody: wake_up_score(),
        }
    }
}
