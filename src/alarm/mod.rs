//! Alarm — the single daily alarm, its clock face and the sound it plays.

pub mod clock;
pub mod face;
pub mod session;
pub mod sound;
pub mod time;

pub use clock::{AlarmClock, AlarmEvent, AlarmStatus};
pub use face::ClockFace;
pub use session::AlarmSession;
pub use sound::{AlarmSound, SoundSource};
pub use time::{AlarmTime, AlarmTimeError};
