use crate::loader::RecordFilter;
use crate::report::SortKey;
use crate::tools::ToolConfig;
use crate::utils::config::DEFAULT_REDIS_URL;
use std::path::PathBuf;

/// Where records are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    /// Live Redis cache at the given URL
    Redis(String),

    /// JSON snapshot file
    Snapshot(PathBuf),
}

/// Parse-validation requested on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    #[default]
    Off,
    ParseOnly,
    Verify,
}

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Record store to read
    pub source: StoreSource,

    /// Report optimizations (default) or non-optimizations
    pub filter: RecordFilter,

    /// Check records with the verifier while loading
    pub validation: ValidationMode,

    /// Run the reduce pass
    pub reduce: bool,

    /// Run the triage pass
    pub triage: bool,

    /// Run the merge pass
    pub merge: bool,

    /// Report ordering
    pub sort_key: SortKey,

    /// Also write the report as JSON
    pub json_output: Option<PathBuf>,

    /// Log pass progress
    pub verbose: bool,

    /// External programs and markers
    pub tools: ToolConfig,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            source: StoreSource::Redis(DEFAULT_REDIS_URL.to_string()),
            filter: RecordFilter::Optimizations,
            validation: ValidationMode::Off,
            reduce: false,
            triage: false,
            merge: false,
            sort_key: SortKey::Length,
            json_output: None,
            verbose: false,
            tools: ToolConfig::default(),
        }
    }
}
