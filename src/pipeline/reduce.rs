//! Reduce pass: shrink each record with the external reducer.

use super::progress::PassProgress;
use super::PassSummary;
use crate::aggregator::ProfileAggregator;
use crate::tools::{ReduceOutcome, Reducer};
use crate::utils::error::PipelineError;
use log::{debug, warn};

/// Run the reducer over a snapshot of the Working Set
///
/// * tool failure: the record is removed
/// * empty output: the record is left as it is
/// * otherwise: the output replaces the record, taking over its counters
pub fn reduce_pass(
    aggregator: &mut ProfileAggregator,
    reducer: &dyn Reducer,
    verbose: bool,
) -> Result<PassSummary, PipelineError> {
    let snapshot = aggregator.snapshot();
    let mut summary = PassSummary::new("reduce");
    let mut progress = PassProgress::new("reduce", snapshot.len(), verbose);

    for (done, identity) in snapshot.iter().enumerate() {
        progress.tick(done);
        if !aggregator.contains(identity) {
            continue;
        }
        summary.visited += 1;

        match reducer.reduce(identity)? {
            ReduceOutcome::Failed(code) => {
                warn!("Reducer failed (exit code {:?}), dropping:\n{}", code, identity);
                aggregator.remove(identity);
                summary.removed += 1;
            }
            ReduceOutcome::Unchanged => {
                debug!("Reducer produced no output, keeping:\n{}", identity);
                summary.kept += 1;
            }
            ReduceOutcome::Reduced(reduced) => {
                aggregator.replace(identity, &reduced)?;
                summary.replaced += 1;
            }
        }
    }
    progress.tick(snapshot.len());

    Ok(summary)
}
