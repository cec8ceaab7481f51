//! JSON report writer.
//!
//! Writes Report structs to JSON files with proper formatting.

use crate::report::Report;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report_json(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "JSON report written ({} records, {} bytes)",
        report.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate that output path is writable
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{CounterBundle, ProfileAggregator, ProfileKind};
    use crate::report::SortKey;

    fn create_test_report() -> Report {
        let mut bundle = CounterBundle::new();
        bundle.add(ProfileKind::Static, "x.c:4", 8);
        let mut agg = ProfileAggregator::new();
        agg.register("lhs rhs", bundle, true);
        Report::build(&agg, SortKey::Sprofile)
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("report.json");

        write_report_json(&report, &path).unwrap();
        let file = File::open(&path).unwrap();
        let loaded: Report = serde_json::from_reader(file).unwrap();

        assert_eq!(loaded, report);
        assert_eq!(loaded.records[0].static_locations[0].location, "x.c:4");
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }
}
