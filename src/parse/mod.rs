//! Raw cell parsing and token normalization
//!
//! This module turns the untyped cells of a raw intake record into typed
//! values and canonical aggregation keys. Every function here is total:
//! malformed input degrades to an empty or unavailable value instead of
//! failing.

pub mod cell;
pub mod normalize;

pub use cell::{element_text, parse_cell, parse_durations, parse_list, scalar_text};
pub use normalize::{normalize, normalized_set};
