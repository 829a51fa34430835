//! Rate snapshot payloads and cache entries.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::freshness::is_fresh;

/// The upstream provider's rate payload, held verbatim.
///
/// Stores a validated `Box<RawValue>` inside an `Arc` so cloning is cheap
/// and serialization is zero-copy: the body a client receives is
/// byte-for-byte what the provider returned. Cache tiers treat the payload
/// as an opaque blob; only [`RateSnapshot::envelope`] looks inside, at
/// fetch time.
#[derive(Debug, Clone)]
pub struct RateSnapshot(Arc<Box<RawValue>>);

impl RateSnapshot {
    /// Create from a raw JSON string, validating once at construction.
    pub fn from_string(s: impl Into<String>) -> Result<Self, serde_json::Error> {
        Ok(Self(Arc::new(RawValue::from_string(s.into())?)))
    }

    /// The raw JSON payload.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Parse the provider envelope (success flag and error payload)
    /// without building the full value tree.
    pub fn envelope(&self) -> Result<ProviderEnvelope, serde_json::Error> {
        serde_json::from_str(self.0.get())
    }
}

impl PartialEq for RateSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.0.get() == other.0.get()
    }
}

impl Serialize for RateSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RateSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(RateSnapshot(Arc::new(raw)))
    }
}

/// The fields of the provider response the gateway actually inspects.
///
/// Everything else in the payload passes through untouched. A payload
/// without a `success` field counts as rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// A snapshot plus the moment it was fetched from the provider.
///
/// `captured_at_ms` is always the upstream fetch time, never a cache-layer
/// write time. Entries serialize as a single composite record so no tier
/// can expose a snapshot without its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub snapshot: RateSnapshot,
    pub captured_at_ms: i64,
}

impl CacheEntry {
    pub fn new(snapshot: RateSnapshot, captured_at_ms: i64) -> Self {
        Self {
            snapshot,
            captured_at_ms,
        }
    }

    /// Whether this entry is still usable at `now_ms`.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        is_fresh(Some(self.captured_at_ms), now_ms)
    }
}
