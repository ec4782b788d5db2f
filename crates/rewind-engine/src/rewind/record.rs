use std::error::Error;
use std::fmt;

/// Owned, single-use reversal operation.
///
/// Returning `Err` marks the undo as failed; it is still consumed.
pub type UndoFn = Box<dyn FnOnce() -> anyhow::Result<()>>;

/// A reversal operation stamped with the clock value it was recorded at.
///
/// Immutable once created. Running it consumes the record, so an undo can
/// never execute twice.
pub struct UndoRecord {
    timestamp: f64,
    undo: UndoFn,
}

impl UndoRecord {
    pub fn new(timestamp: f64, undo: UndoFn) -> Self {
        Self { timestamp, undo }
    }

    /// Clock value at which the effect was recorded.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Runs the undo operation, consuming the record.
    pub fn run(self) -> Result<(), UndoFailure> {
        let timestamp = self.timestamp;
        (self.undo)().map_err(|error| UndoFailure { timestamp, error })
    }
}

impl fmt::Debug for UndoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoRecord")
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

/// An undo operation that returned an error while the clock was rewinding.
#[derive(Debug)]
pub struct UndoFailure {
    /// Timestamp of the record whose undo failed.
    pub timestamp: f64,
    pub error: anyhow::Error,
}

impl fmt::Display for UndoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "undo recorded at t={} failed: {}", self.timestamp, self.error)
    }
}

impl Error for UndoFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn boxed(f: impl FnOnce() -> anyhow::Result<()> + 'static) -> UndoFn {
        Box::new(f)
    }

    #[test]
    fn run_invokes_closure_once() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let rec = UndoRecord::new(2.5, boxed(move || {
            h.set(h.get() + 1);
            Ok(())
        }));

        assert_eq!(rec.timestamp(), 2.5);
        rec.run().unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn failed_run_carries_timestamp() {
        let rec = UndoRecord::new(4.0, boxed(|| anyhow::bail!("door jammed")));
        let failure = rec.run().unwrap_err();

        assert_eq!(failure.timestamp, 4.0);
        assert_eq!(failure.to_string(), "undo recorded at t=4 failed: door jammed");
        assert!(failure.source().is_some());
    }

    #[test]
    fn debug_omits_closure() {
        let rec = UndoRecord::new(1.0, boxed(|| Ok(())));
        assert_eq!(format!("{rec:?}"), "UndoRecord { timestamp: 1.0, .. }");
    }
}
