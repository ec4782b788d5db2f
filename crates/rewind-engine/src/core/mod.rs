//! Time machine core.
//!
//! Owns the authoritative clock, the frame counter, the scrub-mode flag, the
//! observer registry, and the rewind log. The host loop owns a `TimeMachine`
//! and lends it to whatever needs to move the clock or record undoable work.

mod config;
mod ctx;
mod machine;

pub use config::TimeMachineConfig;
pub use ctx::RewindCtx;
pub use machine::{TimeJump, TimeMachine};
