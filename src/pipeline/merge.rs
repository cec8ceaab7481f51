//! Merge pass: purely textual canonicalization.
//!
//! Bit-width annotations (`:i32`) are stripped and standalone integer
//! literals become a placeholder, so records that differ only in concrete
//! widths or constants collapse onto one identity and sum their counters.
//! Value names such as `%12` are left untouched.

use super::progress::PassProgress;
use super::PassSummary;
use crate::aggregator::ProfileAggregator;
use crate::utils::config::CONSTANT_PLACEHOLDER;
use crate::utils::error::PipelineError;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

fn width_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r":i[0-9]+\b").expect("valid regex"))
}

fn literal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)(^|[^%\w])-?[0-9]+\b").expect("valid regex"))
}

/// Canonical form of a record's text
///
/// Applying this to its own output returns the same string.
pub fn canonicalize(text: &str) -> String {
    let without_widths = width_pattern().replace_all(text, "");
    let replacement = format!("${{1}}{}", CONSTANT_PLACEHOLDER);
    literal_pattern()
        .replace_all(&without_widths, replacement.as_str())
        .into_owned()
}

/// Replace every identity in the Working Set with its canonical form
pub fn merge_pass(
    aggregator: &mut ProfileAggregator,
    verbose: bool,
) -> Result<PassSummary, PipelineError> {
    let snapshot = aggregator.snapshot();
    let mut summary = PassSummary::new("merge");
    let mut progress = PassProgress::new("merge", snapshot.len(), verbose);

    for (done, identity) in snapshot.iter().enumerate() {
        progress.tick(done);
        if !aggregator.contains(identity) {
            continue;
        }
        summary.visited += 1;

        let canonical = canonicalize(identity);
        if canonical == *identity {
            summary.kept += 1;
        } else {
            debug!("Merging {:?} into {:?}", identity, canonical);
            summary.replaced += 1;
        }
        aggregator.replace(identity, &canonical)?;
    }
    progress.tick(snapshot.len());

    Ok(summary)
}
