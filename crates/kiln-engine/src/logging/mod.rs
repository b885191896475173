//! Logging utilities.
//!
//! The library only talks to the `log` facade. Binaries and tests that want
//! output call [`init_logging`] once; it installs an `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
