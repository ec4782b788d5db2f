//! Host-loop helpers.
//!
//! The time machine only accepts absolute clock values. `Playback` turns the
//! wall-clock delta of each presented frame into a clock move, honoring
//! pause, reverse, and speed changes.

mod playback;

pub use playback::Playback;
