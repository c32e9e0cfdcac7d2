//! A Rust library for aggregating clinical-intake triage statistics.
//!
//! Records are loaded from JSON Lines, their loosely-formatted cells parsed
//! into typed fields, and then folded in a single pass into frequency tables,
//! duration breakdowns and age statistics ready for a dashboard.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod parse;
pub mod report;
pub mod utils;

// Core types
pub use config::ReportConfig;
pub use error::{Result, TriageStatsError};
pub use models::{DurationField, FieldValue, IntakeRecord, RawRecord, TokenList};

// Aggregation
pub use algorithm::{Aggregates, Aggregator, derive_associated, derive_associated_field};

// Reporting
pub use report::{ReportBuilder, TriageReport, build_report};

// Loading
pub use loader::{load_records, read_records};
