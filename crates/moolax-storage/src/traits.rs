//! Cache-tier traits.
//!
//! The resolver is written against these traits so tests (and degraded
//! deployments) can swap the Redis and PostgreSQL backends for in-memory
//! ones. Implementations must be thread-safe (`Send + Sync`).

use async_trait::async_trait;

use moolax_core::CacheEntry;

use crate::error::StorageError;

/// The shared, eventually-consistent cache tier.
///
/// Reads may lag writes performed by other gateway instances. Callers
/// treat errors from this tier as cache misses: a failure here only costs
/// latency, never correctness.
#[async_trait]
pub trait DistributedCache: Send + Sync {
    /// Reads the cached entry, if any.
    async fn get(&self) -> Result<Option<CacheEntry>, StorageError>;

    /// Writes the entry, replacing any previous one (last write wins).
    async fn put(&self, entry: &CacheEntry) -> Result<(), StorageError>;
}

/// The durable, strongly-consistent cache tier.
///
/// A single logical instance: every gateway instance addresses the same
/// logical store, which makes it the convergence point that keeps a fleet
/// of edge instances from stampeding the upstream provider. Reads and
/// writes are atomic per call; no partial entry is ever visible.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Reads the stored entry, if any.
    async fn get(&self) -> Result<Option<CacheEntry>, StorageError>;

    /// Stores the entry, snapshot and capture time together in one call.
    async fn put(&self, entry: &CacheEntry) -> Result<(), StorageError>;
}
