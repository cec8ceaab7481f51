//! Loading and classification of cache entries.
//!
//! For every key in the store:
//! 1. Fetch its fields, skipping keys without a result field
//! 2. Sum profile fields into a counter bundle
//! 3. Classify as optimization / non-optimization
//! 4. Optionally validate with the external verifier
//! 5. Register the counters with the aggregator

pub mod record;
pub mod validate;

pub use record::CacheRecord;
pub use validate::Validation;

use crate::aggregator::ProfileAggregator;
use crate::store::RecordStore;
use crate::utils::error::LoadError;
use log::{debug, info};

/// Which class of records ends up in the Working Set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordFilter {
    /// Records with a non-empty RHS
    #[default]
    Optimizations,

    /// Records whose RHS is empty
    NonOptimizations,
}

impl RecordFilter {
    pub fn includes(&self, record: &CacheRecord) -> bool {
        match self {
            RecordFilter::Optimizations => record.is_optimization(),
            RecordFilter::NonOptimizations => !record.is_optimization(),
        }
    }
}

/// Counts gathered while loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Keys listed by the store
    pub keys_seen: usize,

    /// Keys without a result field
    pub keys_skipped: usize,

    /// Records with a non-empty RHS
    pub optimizations: usize,

    /// Records with an empty RHS; fixed at load time
    pub discarded: usize,

    /// Records placed in the Working Set
    pub included: usize,

    /// Included records checked with the verifier
    pub validated: usize,
}

impl LoadSummary {
    pub fn records(&self) -> usize {
        self.optimizations + self.discarded
    }

    pub fn summary(&self) -> String {
        format!(
            "Keys: {} | Records: {} | Optimizations: {} | Discarded: {} | Kept: {}",
            self.keys_seen,
            self.records(),
            self.optimizations,
            self.discarded,
            self.included
        )
    }
}

/// Load every record from `store` into `aggregator`
///
/// # Errors
/// * `LoadError::Store` - the store could not be queried
/// * `LoadError::Validation` - a record failed parse-validation
pub fn load_records(
    store: &mut dyn RecordStore,
    aggregator: &mut ProfileAggregator,
    filter: RecordFilter,
    validation: Validation<'_>,
) -> Result<LoadSummary, LoadError> {
    let keys = store.list_keys()?;
    let mut summary = LoadSummary {
        keys_seen: keys.len(),
        ..Default::default()
    };

    info!("Loading {} keys (validation: {:?})", keys.len(), validation);

    for key in keys {
        let fields = store.get_fields(&key)?;

        let Some(record) = CacheRecord::from_fields(&key, &fields) else {
            debug!("Skipping key without result: {:?}", key);
            summary.keys_skipped += 1;
            continue;
        };

        if record.is_optimization() {
            summary.optimizations += 1;
        } else {
            summary.discarded += 1;
        }

        let include = filter.includes(&record);
        if include {
            if validation.is_enabled() {
                validation.check(&record.lhs, &record.rhs)?;
                summary.validated += 1;
            }
            summary.included += 1;
        }

        aggregator.register(&record.identity(), record.counters, include);
    }

    info!("Loaded: {}", summary.summary());
    if validation.is_enabled() {
        info!("Validated {} records ({:?})", summary.validated, validation);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_field("opt", "result", "rhs")
            .with_field("opt", "sprofile a", "2")
            .with_field("noopt", "result", "")
            .with_field("noopt", "sprofile b", "3")
            .with_field("junk", "other", "1")
    }

    #[test]
    fn test_default_keeps_optimizations() {
        let mut agg = ProfileAggregator::new();
        let summary =
            load_records(&mut store(), &mut agg, RecordFilter::default(), Validation::Off).unwrap();

        assert_eq!(summary.keys_seen, 3);
        assert_eq!(summary.keys_skipped, 1);
        assert_eq!(summary.discarded, 1);
        assert_eq!(summary.included, 1);
        assert_eq!(agg.snapshot(), vec!["optrhs"]);
        // Non-optimization counters are still registered
        assert_eq!(agg.bundle("noopt").map(|b| b.static_total()), Some(3));
    }

    #[test]
    fn test_validation_counts_included_records() {
        struct Parses;

        impl crate::tools::Verifier for Parses {
            fn check_parse(&self, _lhs: &str) -> Result<String, crate::utils::error::ToolError> {
                Ok("; parsing successful\n".to_string())
            }

            fn infer_rhs(&self, _lhs: &str) -> Result<String, crate::utils::error::ToolError> {
                Ok(String::new())
            }
        }

        let mut agg = ProfileAggregator::new();
        let summary = load_records(
            &mut store(),
            &mut agg,
            RecordFilter::default(),
            Validation::ParseOnly(&Parses),
        )
        .unwrap();

        assert_eq!(summary.validated, 1);

        let summary =
            load_records(&mut store(), &mut ProfileAggregator::new(), RecordFilter::default(), Validation::Off)
                .unwrap();
        assert_eq!(summary.validated, 0);
    }

    #[test]
    fn test_noopts_mode() {
        let mut agg = ProfileAggregator::new();
        let summary = load_records(
            &mut store(),
            &mut agg,
            RecordFilter::NonOptimizations,
            Validation::Off,
        )
        .unwrap();

        assert_eq!(summary.discarded, 1);
        assert_eq!(agg.snapshot(), vec!["noopt"]);
    }
}
