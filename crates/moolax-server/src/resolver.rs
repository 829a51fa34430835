//! Tiered cache resolution.
//!
//! Lookup walks the tiers cheapest-first and short-circuits at the first
//! fresh hit; a hit in a deeper tier is promoted into the shallower ones.
//! An upstream fetch is the last resort and is written through to every
//! tier before the response is returned. Freshness is a hard guarantee:
//! stale data is never served, even when the upstream is down.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use moolax_core::{CacheEntry, RateSnapshot, now_ms};
use moolax_storage::{DistributedCache, StorageError};
use moolax_upstream::FetchError;

use crate::state::AppState;

/// Failures that abort resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The upstream fetch failed; the caller is expected to retry.
    #[error(transparent)]
    Upstream(#[from] FetchError),

    /// The durable write-through failed. Fatal: returning the snapshot
    /// anyway would break the durability guarantee other instances rely
    /// on.
    #[error("durable cache write failed: {0}")]
    Durable(#[from] StorageError),
}

/// Resolves the latest rate snapshot through the cache tiers.
pub async fn resolve(state: &AppState) -> Result<RateSnapshot, ResolveError> {
    let now = now_ms();

    // Process tier: free, scoped to this instance.
    if let Some(entry) = state.process.load()
        && entry.is_fresh(now)
    {
        tracing::debug!("cache hit (process)");
        return Ok(entry.snapshot.clone());
    }

    // Distributed tier: shared but eventually consistent. Errors here are
    // misses; they only cost latency.
    match state.distributed.get().await {
        Ok(Some(entry)) if entry.is_fresh(now) => {
            tracing::debug!("cache hit (distributed)");
            state.process.store(entry.clone());
            return Ok(entry.snapshot);
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "distributed cache read failed"),
    }

    // Durable tier: authoritative for the single logical key.
    match state.durable.get().await {
        Ok(Some(entry)) if entry.is_fresh(now) => {
            tracing::debug!("cache hit (durable)");
            state.process.store(entry.clone());
            promote_distributed(state.distributed.clone(), entry.clone());
            return Ok(entry.snapshot);
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "durable cache read failed"),
    }

    // Upstream fallback. The durable write is awaited: once this request
    // returns, any instance that reaches the durable tier observes the
    // new entry. The process tier is only warmed after that write lands,
    // so a failed request leaves no tier claiming fresh data.
    tracing::info!("cache miss, contacting upstream provider");
    let snapshot = state.upstream.fetch_latest().await?;
    let entry = CacheEntry::new(snapshot.clone(), now_ms());

    promote_distributed(state.distributed.clone(), entry.clone());
    state.durable.put(&entry).await?;
    state.process.store(entry);

    Ok(snapshot)
}

/// Fire-and-forget write into the distributed tier.
///
/// The resolver never waits on this and never retries it; a failure only
/// affects future latency, so it is logged and swallowed.
fn promote_distributed(cache: Arc<dyn DistributedCache>, entry: CacheEntry) {
    tokio::spawn(async move {
        if let Err(e) = cache.put(&entry).await {
            tracing::warn!(error = %e, "distributed cache write failed");
        }
    });
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let body = match &self {
            ResolveError::Upstream(FetchError::UpstreamUnavailable(status)) => {
                format!("Third-party server failed with status {status}")
            }
            ResolveError::Upstream(FetchError::ProviderRejected(payload)) => {
                format!("Error: {payload}")
            }
            other => other.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
