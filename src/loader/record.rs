//! Conversion of raw store entries into records.

use crate::aggregator::{CounterBundle, ProfileKind};
use crate::store::Fields;
use crate::utils::config::{DYNAMIC_PROFILE_PREFIX, RESULT_FIELD, STATIC_PROFILE_PREFIX};
use log::warn;

/// One cache entry with its counters summed per location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    /// LHS description (the store key)
    pub lhs: String,

    /// RHS description; empty means "not an optimization"
    pub rhs: String,

    pub counters: CounterBundle,
}

impl CacheRecord {
    /// Parse the fields of `key`
    ///
    /// Returns `None` when the key has no result field and therefore is not a record.
    pub fn from_fields(key: &str, fields: &Fields) -> Option<Self> {
        let rhs = fields.get(RESULT_FIELD)?.clone();
        let mut counters = CounterBundle::new();

        for (name, value) in fields {
            let (kind, location) = if let Some(loc) = name.strip_prefix(STATIC_PROFILE_PREFIX) {
                (ProfileKind::Static, loc)
            } else if let Some(loc) = name.strip_prefix(DYNAMIC_PROFILE_PREFIX) {
                (ProfileKind::Dynamic, loc)
            } else {
                continue;
            };

            match value.trim().parse::<u64>() {
                Ok(count) => counters.add(kind, location, count),
                Err(e) => warn!("Ignoring field {:?} of {:?}: bad count {:?} ({})", name, key, value, e),
            }
        }

        Some(Self {
            lhs: key.to_string(),
            rhs,
            counters,
        })
    }

    /// Identity under which the record is aggregated
    pub fn identity(&self) -> String {
        format!("{}{}", self.lhs, self.rhs)
    }

    pub fn is_optimization(&self) -> bool {
        !self.rhs.is_empty()
    }
}
