use crate::rewind::UndoFn;

/// Context passed to observers during a time-advance notification.
///
/// The machine is busy mutating the clock, so actions recorded here are
/// buffered and committed after the mutation returns, stamped with the final
/// clock value.
pub struct RewindCtx<'a> {
    now: f64,
    deferred: &'a mut Vec<UndoFn>,
}

impl<'a> RewindCtx<'a> {
    pub(crate) fn new(now: f64, deferred: &'a mut Vec<UndoFn>) -> Self {
        Self { now, deferred }
    }

    /// Clock position observers reach with the current notification.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queues an undoable effect.
    pub fn add_rewind_action<F>(&mut self, undo: F)
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        self.deferred.push(Box::new(undo));
    }

    /// Actions queued so far during the current clock change.
    #[inline]
    pub fn queued(&self) -> usize {
        self.deferred.len()
    }
}
