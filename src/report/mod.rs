//! Final report: sorted Working Set with aggregated counters.
//!
//! Sorting is an explicit step here. The aggregator's map order is never
//! relied on, and ties are broken by identity text.

use crate::aggregator::{CounterBundle, ProfileAggregator, ProfileKind};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Order of records in the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending length of the record text
    #[default]
    Length,

    /// Descending static profile total
    Sprofile,

    /// Descending dynamic profile total
    Dprofile,
}

/// A location and its aggregated count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: u64,
}

/// One record block of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub identity: String,
    pub static_total: u64,
    pub static_locations: Vec<LocationCount>,
    pub dynamic_total: u64,
    pub dynamic_locations: Vec<LocationCount>,
}

impl ReportEntry {
    /// Build an entry; locations with an empty name are left out
    pub fn new(identity: &str, bundle: &CounterBundle) -> Self {
        let ranked = |kind: ProfileKind| -> Vec<LocationCount> {
            bundle
                .ranked_locations(kind)
                .into_iter()
                .map(|(location, count)| LocationCount {
                    location: location.to_string(),
                    count,
                })
                .collect()
        };

        Self {
            identity: identity.to_string(),
            static_total: bundle.static_total(),
            static_locations: ranked(ProfileKind::Static),
            dynamic_total: bundle.dynamic_total(),
            dynamic_locations: ranked(ProfileKind::Dynamic),
        }
    }
}

/// Sorted report over the Working Set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub version: String,
    pub sort_key: SortKey,
    pub records: Vec<ReportEntry>,
}

impl Report {
    /// Collect and sort every Working Set member of `aggregator`
    pub fn build(aggregator: &ProfileAggregator, sort_key: SortKey) -> Self {
        let mut records: Vec<ReportEntry> = aggregator
            .included()
            .map(|(identity, bundle)| ReportEntry::new(identity, bundle))
            .collect();

        records.sort_by(|a, b| compare(sort_key, a, b));

        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            sort_key,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn compare(sort_key: SortKey, a: &ReportEntry, b: &ReportEntry) -> Ordering {
    let primary = match sort_key {
        SortKey::Length => a.identity.len().cmp(&b.identity.len()),
        SortKey::Sprofile => b.static_total.cmp(&a.static_total),
        SortKey::Dprofile => b.dynamic_total.cmp(&a.dynamic_total),
    };
    primary.then_with(|| a.identity.cmp(&b.identity))
}
