//! Per-record profile counters.
//!
//! A bundle keeps a running total next to each location breakdown. The totals
//! are only ever changed together with the breakdown, so
//! `static_total == sum(static_by_location)` holds for every bundle (and
//! likewise for the dynamic side).

use serde::Serialize;
use std::collections::HashMap;

/// Location-keyed counts, summed on collision
pub type LocationCounts = HashMap<String, u64>;

/// Which family of counters an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Counts attributed at compile/analysis time
    Static,
    /// Counts sampled at runtime
    Dynamic,
}

/// Static and dynamic counters attached to one record identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CounterBundle {
    static_total: u64,
    dynamic_total: u64,
    static_by_location: LocationCounts,
    dynamic_by_location: LocationCounts,
}

impl CounterBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` for `location` to the given family
    pub fn add(&mut self, kind: ProfileKind, location: &str, count: u64) {
        let (total, locations) = match kind {
            ProfileKind::Static => (&mut self.static_total, &mut self.static_by_location),
            ProfileKind::Dynamic => (&mut self.dynamic_total, &mut self.dynamic_by_location),
        };

        *total = total.saturating_add(count);
        let slot = locations.entry(location.to_string()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Add every location count from `counts` to the given family
    pub fn add_all(&mut self, kind: ProfileKind, counts: &LocationCounts) {
        for (location, count) in counts {
            self.add(kind, location, *count);
        }
    }

    /// Fold another bundle into this one
    pub fn absorb(&mut self, other: CounterBundle) {
        self.add_all(ProfileKind::Static, &other.static_by_location);
        self.add_all(ProfileKind::Dynamic, &other.dynamic_by_location);
    }

    pub fn static_total(&self) -> u64 {
        self.static_total
    }

    pub fn dynamic_total(&self) -> u64 {
        self.dynamic_total
    }

    pub fn locations(&self, kind: ProfileKind) -> &LocationCounts {
        match kind {
            ProfileKind::Static => &self.static_by_location,
            ProfileKind::Dynamic => &self.dynamic_by_location,
        }
    }

    /// Locations with a non-empty name, sorted by descending count
    ///
    /// Ties are ordered by location name so output is deterministic.
    pub fn ranked_locations(&self, kind: ProfileKind) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .locations(kind)
            .iter()
            .filter(|(location, _)| !location.is_empty())
            .map(|(location, count)| (location.as_str(), *count))
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Check that both totals equal the sum of their location breakdowns
    pub fn is_consistent(&self) -> bool {
        let sum = |m: &LocationCounts| m.values().fold(0u64, |acc, v| acc.saturating_add(*v));
        self.static_total == sum(&self.static_by_location)
            && self.dynamic_total == sum(&self.dynamic_by_location)
    }
}
