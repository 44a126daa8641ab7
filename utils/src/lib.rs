//! Shared utilities for Guild.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
