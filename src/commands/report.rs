//! Report command implementation.
//!
//! The report command:
//! 1. Checks that the record store is reachable
//! 2. Loads and classifies records (optionally validating them)
//! 3. Runs the enabled transformation passes
//! 4. Sorts and prints the report

use super::models::{ReportArgs, StoreSource, ValidationMode};
use crate::aggregator::ProfileAggregator;
use crate::loader::{load_records, LoadSummary, Validation};
use crate::output::{write_report_json, write_text_report};
use crate::pipeline::{PassSummary, Pipeline};
use crate::report::Report;
use crate::store::{MemoryStore, RecordStore, RedisStore};
use crate::tools::{Reducer, Triager, Verifier};
use anyhow::{Context, Result};
use log::info;
use std::io::{self, BufWriter};
use std::time::Instant;

/// External tools a run may call
pub struct ToolSet<'a> {
    pub verifier: &'a dyn Verifier,
    pub reducer: &'a dyn Reducer,
    pub triager: &'a dyn Triager,
}

/// Everything a report run produced
#[derive(Debug)]
pub struct ReportRun {
    pub report: Report,
    pub load: LoadSummary,
    pub passes: Vec<PassSummary>,
}

/// Execute the report command against the configured store and real tools
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Store unreachable or failing queries
/// * Parse-validation failures
/// * External tools that cannot be launched
/// * Report write errors
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut store = open_store(&args.source)?;

    let verifier = args.tools.verifier();
    let reducer = args.tools.reducer();
    let triager = args.tools.triager();
    let tools = ToolSet {
        verifier: &verifier,
        reducer: &reducer,
        triager: &triager,
    };

    let run = build_report(store.as_mut(), &args, &tools)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_text_report(&mut writer, &run.report).context("Failed to write report")?;

    if let Some(path) = &args.json_output {
        write_report_json(&run.report, path).context("Failed to write JSON report")?;
    }

    info!(
        "Reported {} records ({} discarded as non-optimizations) in {:.2}s",
        run.report.len(),
        run.load.discarded,
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Load, transform and sort records from `store`
///
/// **Public** - lets callers supply their own store and tools
pub fn build_report(
    store: &mut dyn RecordStore,
    args: &ReportArgs,
    tools: &ToolSet<'_>,
) -> Result<ReportRun> {
    store.ping().context("Record store is unreachable")?;

    let validation = match args.validation {
        ValidationMode::Off => Validation::Off,
        ValidationMode::ParseOnly => Validation::ParseOnly(tools.verifier),
        ValidationMode::Verify => Validation::Verify(tools.verifier),
    };

    let mut aggregator = ProfileAggregator::new();
    let load = load_records(store, &mut aggregator, args.filter, validation)
        .context("Failed to load records")?;

    let mut pipeline = Pipeline::new().with_merge(args.merge).verbose(args.verbose);
    if args.reduce {
        pipeline = pipeline.with_reducer(tools.reducer);
    }
    if args.triage {
        pipeline = pipeline.with_triager(tools.triager);
    }

    let passes = pipeline
        .run(&mut aggregator)
        .context("Transformation pass failed")?;

    let report = Report::build(&aggregator, args.sort_key);

    Ok(ReportRun {
        report,
        load,
        passes,
    })
}

/// Open the store named by `source`
pub fn open_store(source: &StoreSource) -> Result<Box<dyn RecordStore>> {
    let store: Box<dyn RecordStore> = match source {
        StoreSource::Redis(url) => {
            Box::new(RedisStore::connect(url).context("Failed to connect to record store")?)
        }
        StoreSource::Snapshot(path) => Box::new(
            MemoryStore::from_snapshot(path)
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        ),
    };
    Ok(store)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    match &args.source {
        StoreSource::Redis(url) => {
            if url.is_empty() {
                anyhow::bail!("Store URL cannot be empty");
            }
            if !["redis://", "rediss://", "redis+unix://", "unix://"]
                .iter()
                .any(|scheme| url.starts_with(scheme))
            {
                anyhow::bail!("Store URL must start with redis://, rediss:// or unix://");
            }
        }
        StoreSource::Snapshot(path) => {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Snapshot path cannot be empty");
            }
        }
    }

    let tools = &args.tools;
    if args.validation != ValidationMode::Off && tools.verifier.is_empty() {
        anyhow::bail!("Verifier program cannot be empty");
    }

    if args.reduce && tools.reducer.is_empty() {
        anyhow::bail!("Reducer program cannot be empty");
    }

    if args.triage {
        if [&tools.triager, &tools.llvm_as, &tools.opt, &tools.llvm_dis]
            .iter()
            .any(|program| program.is_empty())
        {
            anyhow::bail!("Triage programs cannot be empty");
        }
        if tools.bogus_marker.is_empty() || tools.survival_marker.is_empty() {
            anyhow::bail!("Triage markers cannot be empty");
        }
        if tools.bogus_marker == tools.survival_marker {
            anyhow::bail!("Bogus and survival markers must differ");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_default() {
        assert!(validate_args(&ReportArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_bad_scheme() {
        let args = ReportArgs {
            source: StoreSource::Redis("http://localhost:6379".to_string()),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_snapshot() {
        let args = ReportArgs {
            source: StoreSource::Snapshot(PathBuf::new()),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_same_markers() {
        let mut args = ReportArgs {
            triage: true,
            ..Default::default()
        };
        args.tools.survival_marker = args.tools.bogus_marker.clone();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_reducer_only_when_enabled() {
        let mut args = ReportArgs::default();
        args.tools.reducer = String::new();
        assert!(validate_args(&args).is_ok());

        args.reduce = true;
        assert!(validate_args(&args).is_err());
    }
}
