use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use anyhow::Result;

use crate::observer::{ObserverId, ObserverRegistry, TimeObserver};
use crate::rewind::{RewindLog, UndoFailure, UndoFn, UndoRecord};

use super::config::TimeMachineConfig;

/// Outcome of a single clock change.
#[derive(Debug, Default)]
pub struct TimeJump {
    /// Clock value before the change.
    pub from: f64,

    /// Clock value after the change.
    pub to: f64,

    /// Undo records popped and run, failed ones included.
    pub undone: usize,

    /// Time-advance notifications broadcast to observers.
    pub segments: usize,

    /// Undo operations that returned an error.
    pub failures: Vec<UndoFailure>,
}

impl TimeJump {
    fn noop(at: f64) -> Self {
        Self { from: at, to: at, ..Self::default() }
    }

    /// `true` if the request was ignored and nothing was notified.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.segments == 0
    }

    /// Signed size of the requested move; zero for a no-op.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.to - self.from
    }
}

/// The authoritative clock plus everything that reacts to it.
///
/// Moving the clock backward runs every pending undo recorded at or after the
/// target, newest first. Before each undo, observers are advanced exactly to
/// the instant it was recorded at, so no notification ever straddles an undo
/// point.
pub struct TimeMachine {
    time: f64,
    delta_time: f64,
    frame_count: i64,
    is_rewind_time: bool,
    time_epsilon: f64,

    observers: ObserverRegistry,
    rewind_log: RewindLog,

    /// Actions recorded by observers mid-change, committed afterwards.
    deferred: Vec<UndoFn>,
}

impl TimeMachine {
    /// Creates a machine at time 0, frame 0, with an unbounded rewind log.
    pub fn new() -> Self {
        Self::build(TimeMachineConfig::default())
    }

    /// Creates a machine from a validated configuration.
    pub fn with_config(config: TimeMachineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TimeMachineConfig) -> Self {
        let rewind_log = match config.rewind_capacity {
            Some(cap) => RewindLog::bounded(cap),
            None => RewindLog::new(),
        };

        Self {
            time: config.initial_time,
            delta_time: 0.0,
            frame_count: clamp_frame(config.initial_frame),
            is_rewind_time: false,
            time_epsilon: config.time_epsilon,
            observers: ObserverRegistry::new(),
            rewind_log,
            deferred: Vec::new(),
        }
    }

    // ── clock ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Full delta of the last applied clock change.
    #[inline]
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Moves the clock to `value`, undoing recorded effects when crossing them
    /// backward.
    ///
    /// Requests within `time_epsilon` of the current value, and non-finite
    /// values, are ignored.
    pub fn set_time(&mut self, value: f64) -> TimeJump {
        if !value.is_finite() {
            log::warn!("ignoring non-finite clock value {value}");
            return TimeJump::noop(self.time);
        }

        let delta = value - self.time;
        if delta.abs() <= self.time_epsilon {
            return TimeJump::noop(self.time);
        }

        let mut jump = TimeJump { from: self.time, to: value, ..TimeJump::default() };

        // Where observers currently are; trails the clock during a rewind.
        let mut cursor = self.time;

        if delta < 0.0 {
            while let Some(record) = self.rewind_log.pop_at_or_after(value) {
                let step = record.timestamp() - cursor;
                debug_assert!(step <= 0.0, "undo recorded ahead of the clock");
                cursor = record.timestamp();

                log::trace!("rewind segment {step} -> t={cursor}");
                self.observers.broadcast_time(step, cursor, &mut self.deferred);
                jump.segments += 1;

                if let Err(failure) = record.run() {
                    log::error!("{failure}");
                    jump.failures.push(failure);
                }
                jump.undone += 1;
            }
        }

        let remainder = value - cursor;
        self.observers.broadcast_time(remainder, value, &mut self.deferred);
        jump.segments += 1;

        self.delta_time = delta;
        self.time = value;

        if jump.undone > 0 {
            log::debug!(
                "clock {} -> {}: undid {} action(s), {} failed",
                jump.from,
                jump.to,
                jump.undone,
                jump.failures.len()
            );
        }

        self.commit_deferred();
        jump
    }

    /// Shorthand for `set_time(time() + dt)`.
    pub fn advance(&mut self, dt: f64) -> TimeJump {
        self.set_time(self.time + dt)
    }

    // ── frame / scrub ─────────────────────────────────────────────────────

    #[inline]
    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    /// Sets the frame counter (negative input becomes 1). Observers are told
    /// only while scrub mode is active.
    pub fn set_frame_count(&mut self, frame: i64) {
        self.frame_count = clamp_frame(frame);
        if self.is_rewind_time {
            self.observers.broadcast_frame_set(self.frame_count);
        }
    }

    #[inline]
    pub fn is_rewind_time(&self) -> bool {
        self.is_rewind_time
    }

    /// Enters or leaves scrub mode. Every call with `false` tells observers to
    /// finalize at the current frame.
    pub fn set_rewind_mode(&mut self, active: bool) {
        self.is_rewind_time = active;
        if !active {
            self.observers.broadcast_end_frame_set(self.frame_count);
        }
    }

    // ── observers ─────────────────────────────────────────────────────────

    /// Adds `observer` to the end of the broadcast list.
    ///
    /// Only a weak reference is kept; dropping the last `Rc` unregisters it.
    pub fn register<O>(&mut self, observer: &Rc<RefCell<O>>) -> ObserverId
    where
        O: TimeObserver + 'static,
    {
        self.observers.register(observer)
    }

    /// Returns `false` if `id` was not registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    #[inline]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ── rewind log ────────────────────────────────────────────────────────

    /// Records an undoable effect at the current clock value.
    pub fn add_rewind_action<F>(&mut self, undo: F)
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        self.push_record(UndoRecord::new(self.time, Box::new(undo)));
    }

    #[inline]
    pub fn pending_actions(&self) -> usize {
        self.rewind_log.len()
    }

    /// Forgets every pending undo without running it.
    pub fn clear_rewind_log(&mut self) -> usize {
        let n = self.rewind_log.clear();
        if n > 0 {
            log::debug!("discarded {n} pending undo action(s)");
        }
        n
    }

    fn commit_deferred(&mut self) {
        let deferred = std::mem::take(&mut self.deferred);
        for undo in deferred {
            self.push_record(UndoRecord::new(self.time, undo));
        }
    }

    fn push_record(&mut self, record: UndoRecord) {
        if let Some(evicted) = self.rewind_log.push(record) {
            log::debug!(
                "rewind log full; dropping undo recorded at t={}",
                evicted.timestamp()
            );
        }
    }
}

impl Default for TimeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimeMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeMachine")
            .field("time", &self.time)
            .field("delta_time", &self.delta_time)
            .field("frame_count", &self.frame_count)
            .field("is_rewind_time", &self.is_rewind_time)
            .field("observers", &self.observers.len())
            .field("pending_actions", &self.rewind_log.len())
            .finish()
    }
}

fn clamp_frame(frame: i64) -> i64 {
    if frame < 0 { 1 } else { frame }
}
