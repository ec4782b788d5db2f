use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::RewindCtx;
use crate::rewind::UndoFn;

use super::contract::TimeObserver;

/// Handle returned by registration, used to unregister.
///
/// Unique within one registry. Registering the same observer twice yields two
/// distinct ids.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

struct Entry {
    id: ObserverId,
    observer: Weak<RefCell<dyn TimeObserver>>,
}

/// Ordered list of non-owning observer references.
///
/// Broadcasts visit entries in registration order. Duplicates are kept.
#[derive(Default)]
pub struct ObserverRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `observer` to the broadcast list.
    pub fn register<O>(&mut self, observer: &Rc<RefCell<O>>) -> ObserverId
    where
        O: TimeObserver + 'static,
    {
        let strong: Rc<RefCell<dyn TimeObserver>> = observer.clone();

        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.push(Entry {
            id,
            observer: Rc::downgrade(&strong),
        });
        id
    }

    /// Removes the entry for `id`. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Number of registered entries, including ones whose observer has been
    /// dropped but not yet pruned.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sends a time-advance of `delta` to every live observer.
    ///
    /// `now` is the clock position observers reach with this delta. Actions
    /// recorded by observers land in `deferred`.
    pub(crate) fn broadcast_time(&mut self, delta: f64, now: f64, deferred: &mut Vec<UndoFn>) {
        let mut ctx = RewindCtx::new(now, deferred);
        for observer in self.live() {
            observer.borrow_mut().on_time_advance(delta, &mut ctx);
        }
    }

    pub(crate) fn broadcast_frame_set(&mut self, frame: i64) {
        for observer in self.live() {
            observer.borrow_mut().on_frame_set(frame);
        }
    }

    pub(crate) fn broadcast_end_frame_set(&mut self, frame: i64) {
        for observer in self.live() {
            observer.borrow_mut().on_end_frame_set(frame);
        }
    }

    /// Prunes dropped observers and returns strong handles for the rest, in
    /// registration order.
    fn live(&mut self) -> Vec<Rc<RefCell<dyn TimeObserver>>> {
        let before = self.entries.len();
        self.entries.retain(|e| e.observer.strong_count() > 0);

        let pruned = before - self.entries.len();
        if pruned > 0 {
            log::debug!("pruned {pruned} dropped observer(s)");
        }

        self.entries
            .iter()
            .filter_map(|e| e.observer.upgrade())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        deltas: Vec<f64>,
        frames: Vec<i64>,
        ends: Vec<i64>,
    }

    impl TimeObserver for Tally {
        fn on_time_advance(&mut self, delta: f64, _ctx: &mut RewindCtx<'_>) {
            self.deltas.push(delta);
        }

        fn on_frame_set(&mut self, frame: i64) {
            self.frames.push(frame);
        }

        fn on_end_frame_set(&mut self, frame: i64) {
            self.ends.push(frame);
        }
    }

    fn tally() -> Rc<RefCell<Tally>> {
        Rc::new(RefCell::new(Tally::default()))
    }

    // ── registration ──────────────────────────────────────────────────────

    #[test]
    fn ids_are_distinct_for_duplicates() {
        let mut reg = ObserverRegistry::new();
        let t = tally();
        let a = reg.register(&t);
        let b = reg.register(&t);
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn duplicate_registration_notifies_twice() {
        let mut reg = ObserverRegistry::new();
        let t = tally();
        reg.register(&t);
        reg.register(&t);

        reg.broadcast_time(1.5, 1.5, &mut Vec::new());
        assert_eq!(t.borrow().deltas, vec![1.5, 1.5]);
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let mut reg = ObserverRegistry::new();
        let t = tally();
        let id = reg.register(&t);
        assert!(reg.unregister(id));
        assert!(!reg.unregister(id));
        assert!(reg.is_empty());
    }

    #[test]
    fn unregister_removes_only_that_entry() {
        let mut reg = ObserverRegistry::new();
        let t = tally();
        let first = reg.register(&t);
        reg.register(&t);

        reg.unregister(first);
        reg.broadcast_frame_set(7);
        assert_eq!(t.borrow().frames, vec![7]);
    }

    // ── broadcast ─────────────────────────────────────────────────────────

    #[test]
    fn broadcast_follows_registration_order() {
        struct Stamp(Rc<RefCell<Vec<&'static str>>>, &'static str);
        impl TimeObserver for Stamp {
            fn on_time_advance(&mut self, _delta: f64, _ctx: &mut RewindCtx<'_>) {
                self.0.borrow_mut().push(self.1);
            }
        }

        let order = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::new(RefCell::new(Stamp(order.clone(), "a")));
        let b = Rc::new(RefCell::new(Stamp(order.clone(), "b")));

        let mut reg = ObserverRegistry::new();
        reg.register(&b);
        reg.register(&a);
        reg.broadcast_time(1.0, 1.0, &mut Vec::new());

        assert_eq!(*order.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn dropped_observers_are_pruned() {
        let mut reg = ObserverRegistry::new();
        let keep = tally();
        reg.register(&keep);
        {
            let gone = tally();
            reg.register(&gone);
        }
        assert_eq!(reg.len(), 2);

        reg.broadcast_end_frame_set(3);
        assert_eq!(reg.len(), 1);
        assert_eq!(keep.borrow().ends, vec![3]);
    }

    #[test]
    fn default_frame_methods_are_noops() {
        struct TimeOnly(f64);
        impl TimeObserver for TimeOnly {
            fn on_time_advance(&mut self, delta: f64, _ctx: &mut RewindCtx<'_>) {
                self.0 += delta;
            }
        }

        let obs = Rc::new(RefCell::new(TimeOnly(0.0)));
        let mut reg = ObserverRegistry::new();
        reg.register(&obs);

        reg.broadcast_frame_set(1);
        reg.broadcast_end_frame_set(1);
        reg.broadcast_time(-2.0, -2.0, &mut Vec::new());
        assert_eq!(obs.borrow().0, -2.0);
    }
}
