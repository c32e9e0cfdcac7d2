//! Logging utilities for batch operations
//!
//! This module provides standardized log messages on top of the `log` facade.

pub mod log;

// Re-export commonly used functions for convenience
pub use self::log::{log_batch_complete, log_operation_start, log_record_degraded, log_warning};
