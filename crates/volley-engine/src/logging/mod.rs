//! Logging utilities.
//!
//! The engine only speaks the `log` facade. Hosts that want output call
//! [`init_logging`] once; embedders with their own logger skip it.

mod init;

pub use init::{init_logging, LoggingConfig};
