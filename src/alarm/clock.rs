//! Alarm state machine — arm, cancel, coarse tick, ring, stop.
//!
//! A single daily alarm with minute resolution. The caller polls [`AlarmClock::tick`]
//! roughly once per second with the current wall-clock time; the first tick inside
//! the armed minute fires [`AlarmEvent::Ring`] and disarms the clock, so the alarm
//! rings once per arming.

use chrono::Timelike;
use tracing::info;

use super::time::AlarmTime;

/// Where the alarm is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStatus {
    /// No alarm armed.
    Idle,
    /// Waiting for the given time.
    Armed(AlarmTime),
    /// Fired and not yet acknowledged.
    Ringing(AlarmTime),
    /// Acknowledged by the user after ringing.
    Stopped,
}

/// Emitted by [`AlarmClock::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEvent {
    /// The armed time was reached.
    Ring(AlarmTime),
}

#[derive(Debug, Clone)]
pub struct AlarmClock {
    status: AlarmStatus,
}

impl AlarmClock {
    /// A clock with no alarm armed.
    pub fn new() -> Self {
        Self {
            status: AlarmStatus::Idle,
        }
    }

    /// Arm the alarm, replacing any previous one.
    pub fn set(&mut self, time: AlarmTime) {
        info!(%time, "alarm set");
        self.status = AlarmStatus::Armed(time);
    }

    /// Disarm without ringing.
    pub fn cancel(&mut self) {
        if let AlarmStatus::Armed(time) = self.status {
            info!(%time, "alarm cancelled");
        }
        self.status = AlarmStatus::Idle;
    }

    /// Check the alarm against the current time.
    pub fn tick<T: Timelike>(&mut self, now: &T) -> Option<AlarmEvent> {
        match self.status {
            AlarmStatus::Armed(time) if time.matches(now) => {
                info!(%time, "alarm ringing");
                self.status = AlarmStatus::Ringing(time);
                Some(AlarmEvent::Ring(time))
            }
            _ => None,
        }
    }

    /// Acknowledge a ringing alarm. No effect otherwise.
    pub fn stop(&mut self) {
        if let AlarmStatus::Ringing(time) = self.status {
            info!(%time, "alarm stopped");
            self.status = AlarmStatus::Stopped;
        }
    }

    pub fn status(&self) -> AlarmStatus {
        self.status
    }

    /// The armed time, if any.
    pub fn armed_for(&self) -> Option<AlarmTime> {
        match self.status {
            AlarmStatus::Armed(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_ringing(&self) -> bool {
        matches!(self.status, AlarmStatus::Ringing(_))
    }

    /// One-line status for display.
    pub fn status_text(&self) -> String {
        match self.status {
            AlarmStatus::Idle => "No alarm set".to_string(),
            AlarmStatus::Armed(t) => format!("Alarm set for {t}"),
            AlarmStatus::Ringing(_) => "Alarm ringing!".to_string(),
            AlarmStatus::Stopped => "Alarm stopped".to_string(),
        }
    }
}

impl Default for AlarmClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn seven() -> AlarmTime {
        AlarmTime::new(7, 0).unwrap()
    }

    #[test]
    fn new_clock_is_idle() {
        let clock = AlarmClock::new();
        assert_eq!(clock.status(), AlarmStatus::Idle);
        assert_eq!(clock.status_text(), "No alarm set");
    }

    #[test]
    fn set_arms() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        assert_eq!(clock.armed_for(), Some(seven()));
        assert_eq!(clock.status_text(), "Alarm set for 07:00");
    }

    #[test]
    fn tick_before_time_does_nothing() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        assert_eq!(clock.tick(&at(6, 59, 59)), None);
        assert_eq!(clock.status(), AlarmStatus::Armed(seven()));
    }

    #[test]
    fn tick_at_time_rings_once() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        assert_eq!(clock.tick(&at(7, 0, 0)), Some(AlarmEvent::Ring(seven())));
        assert!(clock.is_ringing());
        assert_eq!(clock.status_text(), "Alarm ringing!");
        // Subsequent polls within the same minute do not fire again.
        assert_eq!(clock.tick(&at(7, 0, 1)), None);
        assert_eq!(clock.tick(&at(7, 0, 30)), None);
    }

    #[test]
    fn tick_late_in_minute_still_rings() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        assert!(clock.tick(&at(7, 0, 59)).is_some());
    }

    #[test]
    fn cancelled_alarm_never_rings() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        clock.cancel();
        assert_eq!(clock.tick(&at(7, 0, 0)), None);
        assert_eq!(clock.status(), AlarmStatus::Idle);
    }

    #[test]
    fn stop_after_ring() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        clock.tick(&at(7, 0, 0));
        clock.stop();
        assert_eq!(clock.status(), AlarmStatus::Stopped);
        assert_eq!(clock.status_text(), "Alarm stopped");
    }

    #[test]
    fn stop_while_armed_is_ignored() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        clock.stop();
        assert_eq!(clock.status(), AlarmStatus::Armed(seven()));
    }

    #[test]
    fn set_replaces_previous_alarm() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        let eight = AlarmTime::new(8, 0).unwrap();
        clock.set(eight);
        assert_eq!(clock.tick(&at(7, 0, 0)), None);
        assert_eq!(clock.tick(&at(8, 0, 0)), Some(AlarmEvent::Ring(eight)));
    }

    #[test]
    fn rearm_after_stop() {
        let mut clock = AlarmClock::new();
        clock.set(seven());
        clock.tick(&at(7, 0, 0));
        clock.stop();
        clock.set(seven());
        assert!(clock.tick(&at(7, 0, 10)).is_some());
    }
}
