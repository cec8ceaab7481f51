//! Optcache Report CLI
//!
//! Post-processes a cache of peephole optimization records into a
//! deduplicated, filtered and sorted report with aggregated profile counts.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use optcache_report::commands::{
    dump_store, execute_report, open_store, validate_args, ReportArgs, StoreSource,
    ValidationMode,
};
use optcache_report::loader::RecordFilter;
use optcache_report::report::SortKey;
use optcache_report::tools::ToolConfig;
use optcache_report::utils::config::{
    DEFAULT_BOGUS_MARKER, DEFAULT_LLVM_AS, DEFAULT_LLVM_DIS, DEFAULT_OPT, DEFAULT_REDIS_URL,
    DEFAULT_REDUCER, DEFAULT_SURVIVAL_MARKER, DEFAULT_TRIAGER, DEFAULT_VERIFIER,
};

/// Optcache Report - aggregate, triage and report cached optimizations
#[derive(Parser, Debug)]
#[command(name = "optcache-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Merge records that differ only in widths and constants
    #[arg(long)]
    merge: bool,

    /// Report non-optimizations instead of optimizations
    #[arg(long)]
    noopts: bool,

    /// Check that every reported LHS parses
    #[arg(long)]
    parse: bool,

    /// Sort order of the report
    #[arg(long, value_enum, default_value_t = SortKey::Length)]
    sort: SortKey,

    /// Dump raw keys and fields, then exit
    #[arg(long)]
    raw: bool,

    /// Shrink records with the external reducer
    #[arg(long)]
    reduce: bool,

    /// Drop records the downstream optimizer already handles
    #[arg(long)]
    triage: bool,

    /// Enable verbose logging and pass progress
    #[arg(short, long)]
    verbose: bool,

    /// Check that every cached RHS matches the inferred one
    #[arg(long)]
    verify: bool,

    /// Also write the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Record store URL
    #[arg(long, env = "OPTCACHE_REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    redis_url: String,

    /// Read records from a JSON snapshot instead of the live store
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Verifier program
    #[arg(long, env = "OPTCACHE_VERIFIER", default_value = DEFAULT_VERIFIER)]
    verifier: String,

    /// Reducer program
    #[arg(long, env = "OPTCACHE_REDUCER", default_value = DEFAULT_REDUCER)]
    reducer: String,

    /// Extra argument passed to the reducer (repeatable)
    #[arg(long = "reducer-arg", allow_hyphen_values = true)]
    reducer_args: Vec<String>,

    /// Program lowering a record to IR
    #[arg(long, env = "OPTCACHE_TRIAGER", default_value = DEFAULT_TRIAGER)]
    triager: String,

    /// IR assembler
    #[arg(long, env = "OPTCACHE_LLVM_AS", default_value = DEFAULT_LLVM_AS)]
    llvm_as: String,

    /// IR optimizer
    #[arg(long, env = "OPTCACHE_OPT", default_value = DEFAULT_OPT)]
    opt: String,

    /// IR disassembler
    #[arg(long, env = "OPTCACHE_LLVM_DIS", default_value = DEFAULT_LLVM_DIS)]
    llvm_dis: String,

    /// Marker for garbage lowering output
    #[arg(long, default_value = DEFAULT_BOGUS_MARKER)]
    bogus_marker: String,

    /// Marker showing the transformation survived the optimizer
    #[arg(long, default_value = DEFAULT_SURVIVAL_MARKER)]
    survival_marker: String,
}

fn main() -> Result<()> {
    // Parse CLI arguments; an unknown sort key exits here with a usage error
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let source = match cli.snapshot {
        Some(path) => StoreSource::Snapshot(path),
        None => StoreSource::Redis(cli.redis_url),
    };

    if cli.raw {
        let mut store = open_store(&source)?;
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        dump_store(store.as_mut(), &mut writer).context("Raw dump failed")?;
        return Ok(());
    }

    let validation = if cli.verify {
        ValidationMode::Verify
    } else if cli.parse {
        ValidationMode::ParseOnly
    } else {
        ValidationMode::Off
    };

    let args = ReportArgs {
        source,
        filter: if cli.noopts {
            RecordFilter::NonOptimizations
        } else {
            RecordFilter::Optimizations
        },
        validation,
        reduce: cli.reduce,
        triage: cli.triage,
        merge: cli.merge,
        sort_key: cli.sort,
        json_output: cli.json,
        verbose: cli.verbose,
        tools: ToolConfig {
            verifier: cli.verifier,
            reducer: cli.reducer,
            reducer_args: cli.reducer_args,
            triager: cli.triager,
            llvm_as: cli.llvm_as,
            opt: cli.opt,
            llvm_dis: cli.llvm_dis,
            bogus_marker: cli.bogus_marker,
            survival_marker: cli.survival_marker,
        },
    };

    // Validate args first
    validate_args(&args)?;

    execute_report(args)
}
