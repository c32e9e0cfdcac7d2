//! Aggregation algorithms for triage statistics
//!
//! This module contains the counting machinery: frequency and duration
//! tables, associated-symptom derivation, age statistics and the
//! single-pass aggregator that ties them together.

pub mod age;
pub mod aggregator;
pub mod associated;
pub mod frequency;

pub use age::{AGE_BUCKETS, AgeBucket, AgeSummary, BucketCount, coerce_age};
pub use aggregator::{Aggregates, Aggregator, MISSING_GENDER};
pub use associated::{ASSOCIATED_FIELD, derive_associated, derive_associated_field};
pub use frequency::{DurationTable, FrequencyTable, RankedDurations, RankedEntry};
