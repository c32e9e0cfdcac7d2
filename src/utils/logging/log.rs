//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::path::Path;
use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log completion of a batch step
///
/// # Arguments
/// * `operation` - Past-tense description, e.g. "aggregated"
/// * `records` - Number of records processed
/// * `elapsed` - Optional elapsed time
pub fn log_batch_complete(operation: &str, records: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {records} records in {duration:?}");
    } else {
        log::info!("Successfully {operation} {records} records");
    }
}

/// Log a record field that degraded instead of contributing
///
/// # Arguments
/// * `index` - Zero-based position of the record in the batch
/// * `field` - Name of the logical field
/// * `reason` - Why the field was skipped
pub fn log_record_degraded(index: usize, field: &str, reason: &str) {
    log::debug!("Record {index}: skipping {field}: {reason}");
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
