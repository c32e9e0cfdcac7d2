//! Error handling for triage statistics.
//!
//! Parsing and aggregation are total and never produce these errors. They
//! only arise at the edges: reading input, loading configuration and
//! serializing reports.

use std::io;
use std::path::PathBuf;

/// Specialized error type for triage statistics
#[derive(Debug, thiserror::Error)]
pub enum TriageStatsError {
    /// Error opening or reading an input file
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error reading from a stream without an associated path
    #[error("IO error: {0}")]
    Stream(#[from] io::Error),

    /// Input line is not record-shaped
    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error encoding a report or record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TriageStatsError {
    /// Wrap an I/O error with the path it occurred on
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid record error for a 1-based line number
    #[must_use]
    pub fn invalid_record(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            message: message.into(),
        }
    }
}

/// Result type for triage statistics operations
pub type Result<T> = std::result::Result<T, TriageStatsError>;
