//! Intake record models
//!
//! Raw records as delivered by field extraction, the typed parse results of
//! their cells, and the parsed record the aggregator consumes.

pub mod field;
pub mod record;

pub use field::{DurationField, FieldValue, TokenList};
pub use record::{IntakeRecord, RawRecord};
