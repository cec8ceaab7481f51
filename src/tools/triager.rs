//! Triage: does a downstream optimizer already perform this rewrite?
//!
//! The record is lowered to IR and pushed through
//! `assembler | optimizer -O2 | disassembler`. The final text is scanned for
//! two literal markers.

use super::pipe::{PipeChain, Stage};
use crate::utils::config::{DEFAULT_BOGUS_MARKER, DEFAULT_SURVIVAL_MARKER};
use crate::utils::error::ToolError;
use log::debug;

/// Markers found in the optimized IR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageVerdict {
    /// The lowering produced garbage
    pub bogus: bool,

    /// The desired transformation is still visible after optimization
    pub survived: bool,
}

impl TriageVerdict {
    /// Scan `output` for both markers
    pub fn scan(output: &str, bogus_marker: &str, survival_marker: &str) -> Self {
        Self {
            bogus: output.contains(bogus_marker),
            survived: output.contains(survival_marker),
        }
    }

    /// A record is worth keeping only if the optimizer missed it and the
    /// lowering was sound
    pub fn keep(&self) -> bool {
        self.survived && !self.bogus
    }
}

/// Decides whether a record carries value beyond the downstream optimizer
pub trait Triager {
    fn triage(&self, text: &str) -> Result<TriageVerdict, ToolError>;
}

/// Triager running the external lowering/optimization chain
#[derive(Debug, Clone)]
pub struct ExternalTriager {
    chain: PipeChain,
    bogus_marker: String,
    survival_marker: String,
}

impl ExternalTriager {
    pub fn new(
        triager: &str,
        assembler: &str,
        optimizer: &str,
        opt_level: &str,
        disassembler: &str,
    ) -> Self {
        let chain = PipeChain::new()
            .stage(Stage::new(triager))
            .stage(Stage::new(assembler))
            .stage(Stage::new(optimizer).arg(opt_level))
            .stage(Stage::new(disassembler));

        Self {
            chain,
            bogus_marker: DEFAULT_BOGUS_MARKER.to_string(),
            survival_marker: DEFAULT_SURVIVAL_MARKER.to_string(),
        }
    }

    pub fn with_markers(mut self, bogus: impl Into<String>, survival: impl Into<String>) -> Self {
        self.bogus_marker = bogus.into();
        self.survival_marker = survival.into();
        self
    }

    pub fn chain(&self) -> &PipeChain {
        &self.chain
    }
}

impl Triager for ExternalTriager {
    fn triage(&self, text: &str) -> Result<TriageVerdict, ToolError> {
        let output = self.chain.run(text.as_bytes())?;
        let verdict = TriageVerdict::scan(&output.text(), &self.bogus_marker, &self.survival_marker);
        debug!("Triage verdict: {:?}", verdict);
        Ok(verdict)
    }
}
