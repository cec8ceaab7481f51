//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod dump;
pub mod models;
pub mod report;

// Re-export main command functions
pub use dump::dump_store;
pub use models::{ReportArgs, StoreSource, ValidationMode};
pub use report::{build_report, execute_report, open_store, validate_args, ReportRun, ToolSet};
