//! PostgreSQL durable-tier backend.

use async_trait::async_trait;
use sqlx_core::pool::Pool;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::{PgPoolOptions, Postgres};

use moolax_core::{CacheEntry, RateSnapshot};

use crate::error::StorageError;
use crate::traits::DurableStore;

/// PostgreSQL connection pool type alias.
pub type PgPool = Pool<Postgres>;

/// Well-known logical name all gateway instances address by default.
pub const DEFAULT_STORE_NAME: &str = "moolax";

/// Durable cache tier backed by a single PostgreSQL row.
///
/// Every instance addresses the same logical name, which gives the tier
/// its convergence property. The snapshot and its capture time live in
/// one row and are updated together in a single upsert; single-row
/// atomicity guarantees no partial entry is ever visible. The snapshot
/// column is TEXT, not JSONB, so the payload round-trips verbatim.
pub struct PostgresStore {
    pool: PgPool,
    name: String,
}

impl PostgresStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            name: DEFAULT_STORE_NAME.to_string(),
        }
    }

    /// Connects a pool and targets the default logical store.
    pub async fn connect(url: &str, pool_size: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Overrides the logical store name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Creates the backing table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        query(
            r#"
            CREATE TABLE IF NOT EXISTS fx_cache (
                name TEXT PRIMARY KEY,
                snapshot TEXT NOT NULL,
                captured_at BIGINT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DurableStore for PostgresStore {
    async fn get(&self) -> Result<Option<CacheEntry>, StorageError> {
        let row: Option<(String, i64)> = query_as(
            r#"
            SELECT snapshot, captured_at
            FROM fx_cache
            WHERE name = $1
            "#,
        )
        .bind(&self.name)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((snapshot, captured_at_ms)) => {
                let snapshot = RateSnapshot::from_string(snapshot)?;
                Ok(Some(CacheEntry::new(snapshot, captured_at_ms)))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, entry: &CacheEntry) -> Result<(), StorageError> {
        query(
            r#"
            INSERT INTO fx_cache (name, snapshot, captured_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE
                SET snapshot = EXCLUDED.snapshot,
                    captured_at = EXCLUDED.captured_at
            "#,
        )
        .bind(&self.name)
        .bind(entry.snapshot.as_str())
        .bind(entry.captured_at_ms)
        .execute(&self.pool)
        .await?;

        tracing::debug!(name = %self.name, "durable cache updated");
        Ok(())
    }
}
