//! Aggregation of per-record profile counters.
//!
//! This module tracks, for every record identity:
//! - Static and dynamic totals
//! - Location-keyed breakdowns of both
//! - Membership in the Working Set that the reporter reads

pub mod counters;
pub mod profile;

// Re-export main types
pub use counters::{CounterBundle, LocationCounts, ProfileKind};
pub use profile::ProfileAggregator;
