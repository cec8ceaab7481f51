//! External LHS/RHS verifier.

use super::pipe::{PipeChain, Stage};
use crate::utils::config::{VERIFIER_INFER_ARGS, VERIFIER_PARSE_ARGS};
use crate::utils::error::ToolError;

/// Access to the verifier's two modes
///
/// Both methods return the tool's raw output; judging it is up to the caller.
pub trait Verifier {
    /// Run the verifier in parse-only mode on `lhs`
    fn check_parse(&self, lhs: &str) -> Result<String, ToolError>;

    /// Run the verifier in infer mode on `lhs`, returning the inferred RHS text
    fn infer_rhs(&self, lhs: &str) -> Result<String, ToolError>;
}

/// Verifier backed by an external program reading the LHS on stdin
#[derive(Debug, Clone)]
pub struct ExternalVerifier {
    program: String,
}

impl ExternalVerifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str], lhs: &str) -> Result<String, ToolError> {
        let chain = PipeChain::new().stage(Stage::new(&self.program).args(args.iter().copied()));
        Ok(chain.run(lhs.as_bytes())?.text())
    }
}

impl Verifier for ExternalVerifier {
    fn check_parse(&self, lhs: &str) -> Result<String, ToolError> {
        self.run(VERIFIER_PARSE_ARGS, lhs)
    }

    fn infer_rhs(&self, lhs: &str) -> Result<String, ToolError> {
        self.run(VERIFIER_INFER_ARGS, lhs)
    }
}
