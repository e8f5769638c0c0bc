//! Shared utilities for reputation-based governance.

pub mod logging;

pub use logging::{init_logging, LogFormat};
