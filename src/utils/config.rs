//! Configuration and constants for the CLI.

/// Default address of the cache store
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

// Field names stored per cache key
pub const RESULT_FIELD: &str = "result";
pub const STATIC_PROFILE_PREFIX: &str = "sprofile ";
pub const DYNAMIC_PROFILE_PREFIX: &str = "dprofile ";

// External verifier
pub const DEFAULT_VERIFIER: &str = "souper-check";
pub const VERIFIER_PARSE_ARGS: &[&str] = &["-parse-lhs-only"];
pub const VERIFIER_INFER_ARGS: &[&str] = &["-infer-rhs", "-print-replacement-split"];
pub const PARSE_SUCCESS_MARKER: &str = "; parsing successful";

// External reducer, invoked as `<reducer> <input> -o <output>`
pub const DEFAULT_REDUCER: &str = "reduce";
pub const REDUCER_INPUT_FILE: &str = "input.opt";
pub const REDUCER_OUTPUT_FILE: &str = "output.opt";

// Triage chain: lower | assemble | optimize | disassemble
pub const DEFAULT_TRIAGER: &str = "souper2llvm";
pub const DEFAULT_LLVM_AS: &str = "llvm-as";
pub const DEFAULT_OPT: &str = "opt";
pub const DEFAULT_LLVM_DIS: &str = "llvm-dis";
pub const TRIAGE_OPT_LEVEL: &str = "-O2";
pub const DEFAULT_BOGUS_MARKER: &str = "bogus";
pub const DEFAULT_SURVIVAL_MARKER: &str = "@souper.keep";

// Merge canonicalization
pub const CONSTANT_PLACEHOLDER: &str = "C";

/// Line printed after every record block in the text report
pub const RECORD_SEPARATOR: &str = "------------------------------------------------------";

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";
