//! Triage pass: drop records the downstream optimizer already handles.

use super::progress::PassProgress;
use super::PassSummary;
use crate::aggregator::ProfileAggregator;
use crate::tools::Triager;
use crate::utils::error::PipelineError;
use log::{debug, warn};

/// Keep only records whose transformation survives the optimizer and whose
/// lowering is not bogus
pub fn triage_pass(
    aggregator: &mut ProfileAggregator,
    triager: &dyn Triager,
    verbose: bool,
) -> Result<PassSummary, PipelineError> {
    let snapshot = aggregator.snapshot();
    let mut summary = PassSummary::new("triage");
    let mut progress = PassProgress::new("triage", snapshot.len(), verbose);

    for (done, identity) in snapshot.iter().enumerate() {
        progress.tick(done);
        if !aggregator.contains(identity) {
            continue;
        }
        summary.visited += 1;

        let verdict = triager.triage(identity)?;
        if verdict.bogus {
            warn!("Lowering produced bogus output for:\n{}", identity);
        }

        if verdict.keep() {
            summary.kept += 1;
        } else {
            debug!("Optimizer already covers, dropping:\n{}", identity);
            aggregator.remove(identity);
            summary.removed += 1;
        }
    }
    progress.tick(snapshot.len());

    Ok(summary)
}
