//! Ranked report snapshots for the reporting layer
//!
//! The report builder reads a finished [`Aggregates`](crate::Aggregates) and
//! produces owned, serializable tables. Nothing here mutates the aggregates.

pub mod builder;
pub mod gender;
pub mod summary;

pub use builder::{
    DataQuality, DurationReport, FrequencyReport, ReportBuilder, TriageReport, build_report,
};
pub use gender::{canonicalize_gender, merge_gender_variants};
pub use summary::Highlights;
