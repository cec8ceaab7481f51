//! Profile aggregator: counters per identity plus the Working Set.
//!
//! Every transformation is expressed as a delete-old/insert-new (`replace`)
//! or a pure removal (`remove`); bundles are never edited under a live
//! identity by the passes. Identities registered without being included
//! (for example non-optimizations in the default mode) keep their counters
//! here but are invisible to the reporter.

use super::counters::{CounterBundle, LocationCounts, ProfileKind};
use crate::utils::error::AggregateError;
use log::trace;
use std::collections::{HashMap, HashSet};

/// Owner of all per-record aggregation state for one run
#[derive(Debug, Default)]
pub struct ProfileAggregator {
    bundles: HashMap<String, CounterBundle>,
    working_set: HashSet<String>,
}

impl ProfileAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly loaded record
    ///
    /// Counters are recorded whether or not the identity is included, since
    /// a later replacement may land on it.
    pub fn register(&mut self, identity: &str, bundle: CounterBundle, include: bool) {
        self.bundles
            .entry(identity.to_string())
            .or_default()
            .absorb(bundle);

        if include {
            self.working_set.insert(identity.to_string());
        }
    }

    /// Add location counts into `target`'s static breakdown
    pub fn merge_static(&mut self, target: &str, counts: &LocationCounts) {
        self.merge(target, ProfileKind::Static, counts);
    }

    /// Add location counts into `target`'s dynamic breakdown
    pub fn merge_dynamic(&mut self, target: &str, counts: &LocationCounts) {
        self.merge(target, ProfileKind::Dynamic, counts);
    }

    fn merge(&mut self, target: &str, kind: ProfileKind, counts: &LocationCounts) {
        self.bundles
            .entry(target.to_string())
            .or_default()
            .add_all(kind, counts);
    }

    /// Move all of `old`'s counters onto `new` and swap Working Set membership
    ///
    /// `old`'s storage is erased. Replacing an identity with itself only
    /// ensures it is included.
    pub fn replace(&mut self, old: &str, new: &str) -> Result<(), AggregateError> {
        if new.is_empty() {
            return Err(AggregateError::EmptyReplacement {
                old: old.to_string(),
            });
        }

        if old != new {
            let moved = self.bundles.remove(old).unwrap_or_default();
            self.working_set.remove(old);
            trace!("Replacing {:?} with {:?}", old, new);
            self.bundles.entry(new.to_string()).or_default().absorb(moved);
        } else {
            self.bundles.entry(new.to_string()).or_default();
        }

        self.working_set.insert(new.to_string());
        Ok(())
    }

    /// Drop an identity and everything attached to it
    pub fn remove(&mut self, identity: &str) {
        self.bundles.remove(identity);
        self.working_set.remove(identity);
    }

    /// Sorted copy of the Working Set, used as the input of a pass
    pub fn snapshot(&self) -> Vec<String> {
        let mut identities: Vec<String> = self.working_set.iter().cloned().collect();
        identities.sort();
        identities
    }

    /// Whether `identity` is currently in the Working Set
    pub fn contains(&self, identity: &str) -> bool {
        self.working_set.contains(identity)
    }

    /// Counters for an identity, included or not
    pub fn bundle(&self, identity: &str) -> Option<&CounterBundle> {
        self.bundles.get(identity)
    }

    /// Working Set members with their counters, in no particular order
    pub fn included(&self) -> impl Iterator<Item = (&str, &CounterBundle)> {
        self.working_set
            .iter()
            .filter_map(move |id| self.bundles.get(id).map(|b| (id.as_str(), b)))
    }

    /// Number of identities in the Working Set
    pub fn len(&self) -> usize {
        self.working_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working_set.is_empty()
    }

    /// Every Working Set member has a bundle and every bundle is consistent
    pub fn is_consistent(&self) -> bool {
        self.working_set
            .iter()
            .all(|id| self.bundles.contains_key(id))
            && self.bundles.values().all(CounterBundle::is_consistent)
    }
}
