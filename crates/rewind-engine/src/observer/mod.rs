//! Observer contract and registry.
//!
//! Subsystems implement [`TimeObserver`] and register an `Rc<RefCell<_>>`
//! handle with the time machine. The registry keeps only weak references:
//! the owner decides when an observer dies, and dead entries are pruned at the
//! next broadcast.

mod contract;
mod registry;

pub use contract::TimeObserver;
pub use registry::{ObserverId, ObserverRegistry};
