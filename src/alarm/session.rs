//! Alarm session — drives an [`AlarmClock`] and a [`Player`] from wall-clock polls.

use chrono::NaiveDateTime;

use super::clock::{AlarmClock, AlarmEvent};
use super::face::ClockFace;
use super::time::AlarmTime;
use crate::playback::{AudioError, Player};
use crate::synth::SampleBuffer;

/// One armed alarm and the sound it will loop when it fires.
pub struct AlarmSession<'a> {
    clock: AlarmClock,
    player: &'a mut dyn Player,
    sound: &'a SampleBuffer,
}

impl<'a> AlarmSession<'a> {
    /// Arm `time` and hold the player until the session finishes.
    pub fn new(time: AlarmTime, player: &'a mut dyn Player, sound: &'a SampleBuffer) -> Self {
        let mut clock = AlarmClock::new();
        clock.set(time);
        Self {
            clock,
            player,
            sound,
        }
    }

    /// Check the alarm at `now`; on ring, start looping the sound.
    pub fn poll(&mut self, now: &NaiveDateTime) -> Result<Option<AlarmEvent>, AudioError> {
        let event = self.clock.tick(now);
        if event.is_some() {
            self.player.start(self.sound, true)?;
        }
        Ok(event)
    }

    /// Status line for `now`: clock face plus alarm status.
    pub fn status_line(&self, now: &NaiveDateTime) -> String {
        let face = ClockFace::new(now);
        format!("{}  {}  [{}]", face.time, face.date, self.clock.status_text())
    }

    /// Stop a ringing alarm or cancel a pending one.
    pub fn finish(&mut self) -> Result<(), AudioError> {
        if self.clock.is_ringing() {
            self.player.stop()?;
            self.clock.stop();
        } else {
            self.clock.cancel();
        }
        Ok(())
    }

    pub fn clock(&self) -> &AlarmClock {
        &self.clock
    }
}
