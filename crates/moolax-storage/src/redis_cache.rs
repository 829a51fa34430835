//! Redis distributed-tier backend.

use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::{Config, Pool, Runtime};

use moolax_core::CacheEntry;

use crate::error::StorageError;
use crate::traits::DistributedCache;

/// Redis key holding the latest rate entry.
///
/// One composite record: the snapshot and its capture time are written
/// and read together, so no reader can observe one without the other.
const LATEST_KEY: &str = "fx:latest";

/// Distributed cache tier backed by Redis.
///
/// The key carries no Redis-side TTL: entries are superseded by newer
/// writes, never evicted, and staleness is detected by the freshness
/// policy on read.
pub struct RedisCache {
    pool: Pool,
    key: String,
}

impl RedisCache {
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            key: LATEST_KEY.to_string(),
        }
    }

    /// Creates a connection pool from a `redis://` URL.
    pub fn connect(url: &str) -> Result<Self, StorageError> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StorageError::pool(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Overrides the cache key (used by tests sharing a Redis instance).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

#[async_trait]
impl DistributedCache for RedisCache {
    async fn get(&self) -> Result<Option<CacheEntry>, StorageError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| StorageError::pool(e.to_string()))?;

        let raw: Option<String> = conn.get(&self.key).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, entry: &CacheEntry) -> Result<(), StorageError> {
        let json = serde_json::to_string(entry)?;

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| StorageError::pool(e.to_string()))?;

        conn.set::<_, _, ()>(&self.key, json).await?;
        tracing::debug!(key = %self.key, "distributed cache updated");
        Ok(())
    }
}
