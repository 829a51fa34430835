//! Storage abstraction layer for the Moolax FX gateway.
//!
//! Defines the cache-tier traits ([`DistributedCache`], [`DurableStore`])
//! and the backends that implement them: the process-local tier
//! ([`ProcessCache`]), Redis ([`RedisCache`]), PostgreSQL
//! ([`PostgresStore`]), and the in-memory and no-op backends used in tests
//! and single-instance mode.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod process;
pub mod redis_cache;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::{MemoryCache, MemoryStore, NoopCache};
pub use postgres::{DEFAULT_STORE_NAME, PgPool, PostgresStore};
pub use process::ProcessCache;
pub use redis_cache::RedisCache;
pub use traits::{DistributedCache, DurableStore};
