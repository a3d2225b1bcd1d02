//! Alarm lifecycle integration tests — config file → sound → armed session → ring → stop.

use chrono::{NaiveDate, NaiveDateTime};

use alarm_chime::alarm::{AlarmSession, AlarmSound, AlarmStatus, SoundSource};
use alarm_chime::config::AlarmConfig;
use alarm_chime::playback::{AudioError, BellPlayer, Player};
use alarm_chime::synth::{SampleBuffer, SynthCapability};
use alarm_chime::wav;

#[derive(Default)]
struct RecordingPlayer {
    played: Vec<(SampleBuffer, bool)>,
    stopped: bool,
}

impl Player for RecordingPlayer {
    fn start(&mut self, sound: &SampleBuffer, looping: bool) -> Result<(), AudioError> {
        self.played.push((sound.clone(), looping));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.stopped = true;
        Ok(())
    }
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
    let sound_path = dir.join("alarm_sound.wav");
    let yaml = format!(
        r#"
alarm_time: "06:30"
sound_path: {}
volume: 0.7
render:
  repeat_count: 2
  inter_repeat_pause: 0.25
notes:
  D5: 587.33
melody:
  - {{ note: C5, duration: 0.2 }}
  - {{ note: D5, duration: 0.2 }}
"#,
        sound_path.display()
    );
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn configured_alarm_rings_with_rendered_melody() {
    let dir = tempfile::tempdir().unwrap();
    let config = AlarmConfig::load(&write_config(dir.path())).unwrap();
    assert_eq!(config.alarm_time.to_string(), "06:30");

    let sound = AlarmSound::prepare(&config, SynthCapability::Available).unwrap();
    assert_eq!(sound.source, SoundSource::Rendered);
    // 2 × (4410 + 2205 + 4410) + 5513
    assert_eq!(sound.buffer.len(), 2 * 11025 + 5513);

    let cached = wav::read_wav(&config.sound_path).unwrap();
    assert_eq!(cached, sound.buffer);

    let mut player = RecordingPlayer::default();
    {
        let mut session = AlarmSession::new(config.alarm_time, &mut player, &sound.buffer);
        for s in 0..60 {
            session.poll(&at(6, 29, s)).unwrap();
        }
        assert_eq!(session.clock().status(), AlarmStatus::Armed(config.alarm_time));

        assert!(session.poll(&at(6, 30, 0)).unwrap().is_some());
        assert!(session.poll(&at(6, 30, 1)).unwrap().is_none());
        assert!(session.clock().is_ringing());

        session.finish().unwrap();
        assert_eq!(session.clock().status_text(), "Alarm stopped");
    }

    assert_eq!(player.played.len(), 1);
    assert_eq!(player.played[0].0, sound.buffer);
    assert!(player.played[0].1, "alarm sound should loop");
    assert!(player.stopped);
}

#[test]
fn bell_fallback_rings_on_alarm() {
    let sound = SampleBuffer::silence(0.1, 22050);
    let mut bell = BellPlayer::new(Vec::new());
    {
        let time = "07:00".parse().unwrap();
        let mut session = AlarmSession::new(time, &mut bell, &sound);
        session.poll(&at(7, 0, 0)).unwrap();
        session.finish().unwrap();
    }
    assert_eq!(bell.into_inner(), b"\x07\x07\x07\x07\x07".to_vec());
}

#[test]
fn bad_note_in_config_fails_before_any_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let sound_path = dir.path().join("alarm_sound.wav");
    let yaml = format!(
        concat!(
            "sound_path: {}\n",
            "melody:\n",
            "  - {{ note: G4, duration: 0.5 }}\n",
            "  - {{ note: \"G#4\", duration: 0.5 }}\n",
        ),
        sound_path.display()
    );
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, yaml).unwrap();

    let config = AlarmConfig::load(&path).unwrap();
    let err = AlarmSound::prepare(&config, SynthCapability::Available).unwrap_err();
    assert!(err.to_string().contains("G#4"), "{err}");
    assert!(!sound_path.exists());
}
