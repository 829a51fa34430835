//! In-memory backends for tests and single-instance mode.

use async_trait::async_trait;
use tokio::sync::RwLock;

use moolax_core::CacheEntry;

use crate::error::StorageError;
use crate::traits::{DistributedCache, DurableStore};

/// Distributed-tier stand-in backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entry: RwLock<Option<CacheEntry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DistributedCache for MemoryCache {
    async fn get(&self) -> Result<Option<CacheEntry>, StorageError> {
        Ok(self.entry.read().await.clone())
    }

    async fn put(&self, entry: &CacheEntry) -> Result<(), StorageError> {
        *self.entry.write().await = Some(entry.clone());
        Ok(())
    }
}

/// Durable-tier stand-in backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entry: RwLock<Option<CacheEntry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self) -> Result<Option<CacheEntry>, StorageError> {
        Ok(self.entry.read().await.clone())
    }

    async fn put(&self, entry: &CacheEntry) -> Result<(), StorageError> {
        *self.entry.write().await = Some(entry.clone());
        Ok(())
    }
}

/// Distributed tier that never hits.
///
/// Installed when no Redis URL is configured: the gateway then runs on the
/// process and durable tiers alone.
#[derive(Debug, Default)]
pub struct NoopCache;

#[async_trait]
impl DistributedCache for NoopCache {
    async fn get(&self) -> Result<Option<CacheEntry>, StorageError> {
        Ok(None)
    }

    async fn put(&self, _entry: &CacheEntry) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moolax_core::RateSnapshot;

    fn entry(captured_at_ms: i64) -> CacheEntry {
        CacheEntry::new(
            RateSnapshot::from_string(r#"{"success":true}"#).unwrap(),
            captured_at_ms,
        )
    }

    #[tokio::test]
    async fn memory_cache_round_trip() {
        let cache = MemoryCache::new();
        assert!(cache.get().await.unwrap().is_none());

        cache.put(&entry(7)).await.unwrap();
        assert_eq!(cache.get().await.unwrap().unwrap().captured_at_ms, 7);
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get().await.unwrap().is_none());

        store.put(&entry(9)).await.unwrap();
        assert_eq!(store.get().await.unwrap().unwrap().captured_at_ms, 9);
    }

    #[tokio::test]
    async fn memory_backends_replace_on_write() {
        let cache = MemoryCache::new();
        cache.put(&entry(1)).await.unwrap();
        cache.put(&entry(2)).await.unwrap();
        assert_eq!(cache.get().await.unwrap().unwrap().captured_at_ms, 2);
    }

    #[tokio::test]
    async fn noop_cache_swallows_writes() {
        let cache = NoopCache;
        cache.put(&entry(3)).await.unwrap();
        assert!(cache.get().await.unwrap().is_none());
    }
}
