//! Response cache.
//!
//! Cache-aside memoization of serialized responses keyed by route and
//! parameters. The store is opaque `key -> JSON string` with a per-entry
//! lifetime; domain values are never cached, only their serialized bytes.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::catalog::ChartPayload;
use crate::error_handling::StatsError;
use crate::stats::SiteReport;

/// Key/value store with per-entry expiry.
pub trait ResponseCache: Send + Sync {
    /// Cached value for `key`, if present and not expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl`.
    fn insert(&self, key: String, value: String, ttl: Duration);
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Bounded in-process [`ResponseCache`].
///
/// When full, expired entries are purged first; if that frees nothing, the
/// entry closest to expiry is evicted.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_entries: usize,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        MemoryCache {
            entries: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave an entry half-written.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert(&self, key: String, value: String, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.lock();
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            entries.retain(|_, entry| entry.expires_at > now);
            if entries.len() >= self.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.expires_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }
}

/// Whether a computed value may be stored.
pub trait Cacheable {
    fn is_cacheable(&self) -> bool {
        true
    }
}

impl Cacheable for ChartPayload {}

impl Cacheable for u64 {}

// A report with unavailable entries is served but recomputed next time.
impl Cacheable for SiteReport {
    fn is_cacheable(&self) -> bool {
        !self.is_degraded()
    }
}

/// A serialized response and whether it came from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached {
    pub body: String,
    pub hit: bool,
}

/// Returns the cached JSON for `key`, or computes, serializes and stores it.
///
/// Errors are never cached.
///
/// # Errors
///
/// Propagates the error from `compute`, or `StatsError::Serialization` if the
/// value cannot be encoded.
pub async fn cached_json<T, F, Fut>(
    cache: &dyn ResponseCache,
    key: &str,
    ttl: Duration,
    compute: F,
) -> Result<Cached, StatsError>
where
    T: Serialize + Cacheable,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, StatsError>>,
{
    if let Some(body) = cache.get(key) {
        log::debug!("Cache hit for {key}");
        return Ok(Cached { body, hit: true });
    }

    log::debug!("Cache miss for {key}");
    let value = compute().await?;
    let body =
        serde_json::to_string(&value).map_err(|e| StatsError::Serialization(e.to_string()))?;
    if value.is_cacheable() {
        cache.insert(key.to_string(), body.clone(), ttl);
    }
    Ok(Cached { body, hit: false })
}
