//! Logging utilities.
//!
//! The engine itself only talks to the `log` facade. Hosts that want output
//! call [`init_logging`] once; libraries embedding the engine can install any
//! other `log` backend instead.

mod init;

pub use init::{init_logging, LoggingConfig};
