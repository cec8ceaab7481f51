//! Optcache Report
//!
//! Aggregation, triage and reporting for persistent caches of peephole
//! optimization records.
//!
//! Records are read from a key/value store, classified, optionally run
//! through the Reduce, Triage and Merge passes, and printed as a sorted
//! report with static and dynamic profile counts per source location.
//!
//! ```bash
//! optcache-report --merge --sort sprofile
//! ```

pub mod aggregator;
pub mod commands;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod tools;
pub mod utils;
