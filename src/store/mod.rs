//! Record store adapters.
//!
//! The cache is treated as a generic associative store: the only operations
//! needed are "list every key" and "get every field of a key". Two backends
//! are provided:
//! - `RedisStore` talks to the live cache
//! - `MemoryStore` holds entries in memory, optionally loaded from a JSON snapshot

pub mod memory;
pub mod redis_store;

use crate::utils::error::StoreError;
use std::collections::HashMap;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Field map of a single cache key
pub type Fields = HashMap<String, String>;

/// Read access to the backing key/value store
pub trait RecordStore {
    /// Check that the store is reachable; called once before loading
    fn ping(&mut self) -> Result<(), StoreError>;

    /// Every key in the store, in no particular order
    fn list_keys(&mut self) -> Result<Vec<String>, StoreError>;

    /// Every field of `key`; empty if the key has none
    fn get_fields(&mut self, key: &str) -> Result<Fields, StoreError>;
}
