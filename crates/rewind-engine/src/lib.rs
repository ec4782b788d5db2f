//! Rewind engine crate.
//!
//! A deterministic time-rewind coordinator for simulation loops. One
//! [`TimeMachine`](core::TimeMachine) owns the authoritative clock; subsystems
//! register as [`TimeObserver`](observer::TimeObserver)s and record undo
//! actions against the current clock value. Moving the clock backward runs
//! those undos newest first, with observers stepped exactly onto each undo's
//! timestamp before it fires.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`core`] | `TimeMachine`, `TimeMachineConfig`, `RewindCtx`, `TimeJump` |
//! | [`observer`] | `TimeObserver`, `ObserverId`, `ObserverRegistry` |
//! | [`rewind`] | `UndoRecord`, `RewindLog`, `UndoFailure` |
//! | [`time`] | `Playback` host-loop helper |
//! | [`logging`] | `init_logging`, `LoggingConfig` |
//!
//! # Quick start
//!
//! ```rust
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//!
//! use rewind_engine::core::{RewindCtx, TimeMachine};
//! use rewind_engine::observer::TimeObserver;
//!
//! struct Odometer(f64);
//!
//! impl TimeObserver for Odometer {
//!     fn on_time_advance(&mut self, delta: f64, _ctx: &mut RewindCtx<'_>) {
//!         self.0 += delta;
//!     }
//! }
//!
//! let mut tm = TimeMachine::new();
//! let odo = Rc::new(RefCell::new(Odometer(0.0)));
//! tm.register(&odo);
//!
//! let doors = Rc::new(Cell::new(0));
//! tm.set_time(2.0);
//! doors.set(1);
//! let d = doors.clone();
//! tm.add_rewind_action(move || {
//!     d.set(0);
//!     Ok(())
//! });
//!
//! tm.set_time(5.0);
//! tm.set_time(1.0);
//! assert_eq!(doors.get(), 0);
//! assert_eq!(odo.borrow().0, 1.0);
//! ```

pub mod core;
pub mod observer;
pub mod rewind;
pub mod time;

pub mod logging;
