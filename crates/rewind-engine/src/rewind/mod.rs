//! Undo records and the LIFO log that holds them.
//!
//! Records are stamped with the clock value at which they were pushed, so the
//! log is ordered by timestamp from bottom (oldest) to top (newest). The core
//! only ever needs to peek at the top to find the most recent pending effect.

mod rewind_log;
mod record;

pub use rewind_log::RewindLog;
pub use record::{UndoFailure, UndoFn, UndoRecord};
