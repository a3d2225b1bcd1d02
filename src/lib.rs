//! alarm-chime — a terminal alarm clock that synthesizes its own wake-up melody.

pub mod alarm;
pub mod config;
pub mod melody;
pub mod playback;
pub mod synth;
pub mod wav;
