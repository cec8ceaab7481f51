//! Transformation pipeline over the Working Set.
//!
//! Passes run in a fixed order when enabled: Reduce, Triage, Merge.
//! Every pass iterates a snapshot of the Working Set taken when it starts,
//! so records added or removed during a pass do not change what it visits.

pub mod merge;
pub mod progress;
pub mod reduce;
pub mod triage;

pub use merge::{canonicalize, merge_pass};
pub use progress::PassProgress;
pub use reduce::reduce_pass;
pub use triage::triage_pass;

use crate::aggregator::ProfileAggregator;
use crate::tools::{Reducer, Triager};
use crate::utils::error::PipelineError;
use log::info;

/// What a single pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub pass: &'static str,
    pub visited: usize,
    pub kept: usize,
    pub replaced: usize,
    pub removed: usize,
}

impl PassSummary {
    pub fn new(pass: &'static str) -> Self {
        Self {
            pass,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: visited {} | kept {} | replaced {} | removed {}",
            self.pass, self.visited, self.kept, self.replaced, self.removed
        )
    }
}

/// The set of enabled passes
#[derive(Default)]
pub struct Pipeline<'a> {
    reducer: Option<&'a dyn Reducer>,
    triager: Option<&'a dyn Triager>,
    merge: bool,
    verbose: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reducer(mut self, reducer: &'a dyn Reducer) -> Self {
        self.reducer = Some(reducer);
        self
    }

    pub fn with_triager(mut self, triager: &'a dyn Triager) -> Self {
        self.triager = Some(triager);
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run every enabled pass in order
    pub fn run(&self, aggregator: &mut ProfileAggregator) -> Result<Vec<PassSummary>, PipelineError> {
        let mut summaries = Vec::new();

        if let Some(reducer) = self.reducer {
            info!("Reducing {} records...", aggregator.len());
            summaries.push(reduce_pass(aggregator, reducer, self.verbose)?);
        }

        if let Some(triager) = self.triager {
            info!("Triaging {} records...", aggregator.len());
            summaries.push(triage_pass(aggregator, triager, self.verbose)?);
        }

        if self.merge {
            info!("Merging {} records...", aggregator.len());
            summaries.push(merge_pass(aggregator, self.verbose)?);
        }

        for summary in &summaries {
            info!("{}", summary.summary());
        }

        Ok(summaries)
    }
}
