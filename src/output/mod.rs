//! Output writers for the final report.
//!
//! This module handles writing reports in two formats:
//! - Line-oriented text (stdout)
//! - JSON export (file)

pub mod json;
pub mod text;

// Re-export main functions
pub use json::write_report_json;
pub use text::{report_to_string, write_text_report};
