//! Core domain types for the Moolax FX gateway.
//!
//! Defines the rate snapshot payload, the cache entry that pairs a snapshot
//! with its capture time, and the freshness policy all cache tiers share.

pub mod freshness;
pub mod snapshot;

pub use freshness::{CACHE_TTL_MS, is_fresh, now_ms};
pub use snapshot::{CacheEntry, ProviderEnvelope, RateSnapshot};
