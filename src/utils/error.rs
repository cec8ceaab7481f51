//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the record store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store unreachable: {0}")]
    Unreachable(String),

    #[error("Store query failed: {0}")]
    QueryFailed(#[from] redis::RedisError),

    #[error("Failed to read snapshot {}: {source}", path.display())]
    SnapshotRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid snapshot format: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

/// Errors that can occur while running an external tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("I/O error while talking to {program}: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },

    #[error("Pipe chain has no stages")]
    EmptyChain,
}

/// Errors raised by parse-validation during loading
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Verifier could not parse LHS:\n{lhs}\nverifier output:\n{output}")]
    ParseFailed { lhs: String, output: String },

    #[error("Inferred RHS does not match cached RHS for LHS:\n{lhs}\ncached:\n{expected}\ninferred:\n{actual}")]
    Mismatch {
        lhs: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Errors that abort loading records from the store
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Contract violations inside the profile aggregator
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Replacement of {old:?} collapsed to an empty identity")]
    EmptyReplacement { old: String },
}

/// Errors that abort a transformation pass
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
