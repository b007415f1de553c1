use crate::models::ReferencePoint;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Memo of geocoder answers, keyed by address
///
/// "Not found" answers are stored too, so a bad address is only sent to the
/// geocoder once. Failed lookups are never stored.
#[derive(Clone)]
pub struct GeocodeCache {
    entries: moka::future::Cache<String, Option<ReferencePoint>>,
}

impl GeocodeCache {
    /// Create a new memo
    ///
    /// `capacity` of `None` keeps every address for the process lifetime;
    /// `ttl_secs` of `None` never expires entries.
    pub fn new(capacity: Option<u64>, ttl_secs: Option<u64>) -> Self {
        let mut builder = moka::future::Cache::<String, Option<ReferencePoint>>::builder();
        if let Some(capacity) = capacity {
            builder = builder.max_capacity(capacity);
        }
        if let Some(ttl) = ttl_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }

        Self {
            entries: builder.build(),
        }
    }

    /// Look up a previous answer. The outer `Option` is the memo hit.
    pub async fn get(&self, address: &str) -> Option<Option<ReferencePoint>> {
        let key = CacheKey::geocode(address);
        let hit = self.entries.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Geocode cache hit: {}", key);
        } else {
            tracing::trace!("Geocode cache miss: {}", key);
        }
        hit
    }

    /// Remember the geocoder's answer for an address
    pub async fn insert(&self, address: &str, answer: Option<ReferencePoint>) {
        let key = CacheKey::geocode(address);
        self.entries.insert(key, answer).await;
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a geocoded address
    ///
    /// Surrounding whitespace does not make a new address.
    pub fn geocode(address: &str) -> String {
        format!("geocode:{}", address.trim())
    }
}
