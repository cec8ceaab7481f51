//! External size reducer, driven through scratch files.

use crate::utils::config::{REDUCER_INPUT_FILE, REDUCER_OUTPUT_FILE};
use crate::utils::error::ToolError;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Result of one reducer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceOutcome {
    /// The tool signalled failure (exit code, if any)
    Failed(Option<i32>),

    /// The tool succeeded without producing anything
    Unchanged,

    /// The tool produced a replacement text
    Reduced(String),
}

/// Shrinks a record's text
pub trait Reducer {
    fn reduce(&self, text: &str) -> Result<ReduceOutcome, ToolError>;
}

/// Reducer invoked as `<program> [args] <input> -o <output>`
#[derive(Debug, Clone)]
pub struct ExternalReducer {
    program: String,
    args: Vec<String>,
}

impl ExternalReducer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn io_error(&self, source: std::io::Error) -> ToolError {
        ToolError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

impl Reducer for ExternalReducer {
    fn reduce(&self, text: &str) -> Result<ReduceOutcome, ToolError> {
        // Removed together with its contents when dropped, on every path
        let scratch = tempfile::Builder::new()
            .prefix("optcache-reduce")
            .tempdir()
            .map_err(|e| self.io_error(e))?;

        let input = scratch.path().join(REDUCER_INPUT_FILE);
        let output = scratch.path().join(REDUCER_OUTPUT_FILE);
        fs::write(&input, text).map_err(|e| self.io_error(e))?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            debug!("{} exited with {}", self.program, status);
            return Ok(ReduceOutcome::Failed(status.code()));
        }

        let reduced = match fs::read_to_string(&output) {
            Ok(reduced) => reduced,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.io_error(e)),
        };

        if reduced.trim().is_empty() {
            Ok(ReduceOutcome::Unchanged)
        } else {
            Ok(ReduceOutcome::Reduced(reduced))
        }
    }
}
