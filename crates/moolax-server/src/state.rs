use std::sync::Arc;

use moolax_storage::{DistributedCache, DurableStore, ProcessCache};
use moolax_upstream::RateProvider;

/// Shared application state: the injected cache-tier handles and the
/// secret the authenticator checks against.
///
/// The handles are trait objects so tests swap in in-memory tiers and a
/// scripted provider; production wiring happens in the server builder.
#[derive(Clone)]
pub struct AppState {
    /// Process-local tier, scoped to this instance's lifetime.
    pub process: ProcessCache,

    /// Shared, eventually-consistent tier.
    pub distributed: Arc<dyn DistributedCache>,

    /// Durable single-writer tier.
    pub durable: Arc<dyn DurableStore>,

    /// Third-party rate provider.
    pub upstream: Arc<dyn RateProvider>,

    /// Expected bearer token for inbound requests.
    pub client_api_key: String,
}
