//! External analysis tools.
//!
//! Every tool is a black-box subprocess. Each has a trait at the seam so the
//! pipeline can be driven by fakes in tests:
//! - `Verifier`: parse-only / infer-and-compare checks on an LHS
//! - `Reducer`: file-based size reduction of a record
//! - `Triager`: lowering + optimizer chain scanned for markers

pub mod pipe;
pub mod reducer;
pub mod triager;
pub mod verifier;

pub use pipe::{ChainOutput, PipeChain, Stage};
pub use reducer::{ExternalReducer, ReduceOutcome, Reducer};
pub use triager::{ExternalTriager, TriageVerdict, Triager};
pub use verifier::{ExternalVerifier, Verifier};

use crate::utils::config::{
    DEFAULT_BOGUS_MARKER, DEFAULT_LLVM_AS, DEFAULT_LLVM_DIS, DEFAULT_OPT, DEFAULT_REDUCER,
    DEFAULT_SURVIVAL_MARKER, DEFAULT_TRIAGER, DEFAULT_VERIFIER, TRIAGE_OPT_LEVEL,
};

/// Programs and markers used for external tool invocations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub verifier: String,
    pub reducer: String,
    /// Extra arguments placed before `<input> -o <output>`
    pub reducer_args: Vec<String>,
    pub triager: String,
    pub llvm_as: String,
    pub opt: String,
    pub llvm_dis: String,
    pub bogus_marker: String,
    pub survival_marker: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            verifier: DEFAULT_VERIFIER.to_string(),
            reducer: DEFAULT_REDUCER.to_string(),
            reducer_args: Vec::new(),
            triager: DEFAULT_TRIAGER.to_string(),
            llvm_as: DEFAULT_LLVM_AS.to_string(),
            opt: DEFAULT_OPT.to_string(),
            llvm_dis: DEFAULT_LLVM_DIS.to_string(),
            bogus_marker: DEFAULT_BOGUS_MARKER.to_string(),
            survival_marker: DEFAULT_SURVIVAL_MARKER.to_string(),
        }
    }
}

impl ToolConfig {
    pub fn verifier(&self) -> ExternalVerifier {
        ExternalVerifier::new(&self.verifier)
    }

    pub fn reducer(&self) -> ExternalReducer {
        ExternalReducer::new(&self.reducer).with_args(self.reducer_args.clone())
    }

    pub fn triager(&self) -> ExternalTriager {
        ExternalTriager::new(
            &self.triager,
            &self.llvm_as,
            &self.opt,
            TRIAGE_OPT_LEVEL,
            &self.llvm_dis,
        )
        .with_markers(&self.bogus_marker, &self.survival_marker)
    }
}
