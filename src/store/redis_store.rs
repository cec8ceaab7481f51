//! Redis-backed record store.

use super::{Fields, RecordStore};
use crate::utils::error::StoreError;
use log::{debug, info};
use redis::{Client, Commands, Connection};

/// Record store backed by a live Redis cache
pub struct RedisStore {
    connection: Connection,
}

impl RedisStore {
    /// Connect to the store at `url`
    ///
    /// Any failure here means the store is unreachable.
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        info!("Connecting to record store: {}", url);

        let client = Client::open(url)
            .map_err(|e| StoreError::Unreachable(format!("{}: {}", url, e)))?;
        let connection = client
            .get_connection()
            .map_err(|e| StoreError::Unreachable(format!("{}: {}", url, e)))?;

        Ok(Self { connection })
    }
}

impl RecordStore for RedisStore {
    fn ping(&mut self) -> Result<(), StoreError> {
        let reply: String = redis::cmd("PING")
            .query(&mut self.connection)
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        debug!("Store answered PING with {}", reply);
        Ok(())
    }

    fn list_keys(&mut self) -> Result<Vec<String>, StoreError> {
        let keys: Vec<String> = self.connection.keys("*")?;
        debug!("Store holds {} keys", keys.len());
        Ok(keys)
    }

    fn get_fields(&mut self, key: &str) -> Result<Fields, StoreError> {
        let fields: Fields = self.connection.hgetall(key)?;
        Ok(fields)
    }
}
