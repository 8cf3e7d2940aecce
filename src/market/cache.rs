//! Shared market-data cache with TTL and single-flight fetches
//!
//! One explicit cache object is constructed at engine build time and injected
//! wherever market data is needed; there is no module-level singleton.
//! Concurrent requests that miss on the same key share one in-flight fetch
//! instead of issuing duplicate external calls. Expired entries are retained
//! and served as a degraded fallback when a refresh fails.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::error::CollaboratorError;
use crate::market::snapshot::MarketSnapshot;

/// Default snapshot time-to-live.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key: one snapshot per company/product/day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketKey {
    pub company: String,
    pub product_type: String,
    pub day: NaiveDate,
}

impl MarketKey {
    pub fn new(company: &str, product_type: &str, day: NaiveDate) -> Self {
        Self {
            company: company.to_string(),
            product_type: product_type.to_string(),
            day,
        }
    }
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Entry within its TTL
    Fresh(MarketSnapshot),

    /// This call performed (or joined) a successful fetch
    Fetched(MarketSnapshot),

    /// Fetch failed; serving an expired entry for the same key
    Stale(MarketSnapshot),

    /// Fetch failed and nothing was cached
    Unavailable { reason: String },
}

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: MarketSnapshot,
    fetched_at: Instant,
}

/// Slot shared by all callers waiting on one in-flight fetch.
struct FlightSlot {
    result: Mutex<Option<Result<MarketSnapshot, String>>>,
    ready: Condvar,
}

impl FlightSlot {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn publish(&self, result: Result<MarketSnapshot, String>) {
        *lock(&self.result) = Some(result);
        self.ready.notify_all();
    }

    fn wait(&self) -> Result<MarketSnapshot, String> {
        let mut guard = lock(&self.result);
        loop {
            if let Some(result) = guard.as_ref() {
                return result.clone();
            }
            guard = self
                .ready
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// TTL + single-flight cache for market snapshots.
pub struct MarketDataCache {
    ttl: Duration,
    entries: Mutex<HashMap<MarketKey, CacheEntry>>,
    inflight: Mutex<HashMap<MarketKey, std::sync::Arc<FlightSlot>>>,

    // Statistics
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub stale_served: AtomicU64,
}

impl MarketDataCache {
    /// Create a cache with the default 5-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stale_served: AtomicU64::new(0),
        }
    }

    /// Look up `key`, fetching through `fetch` on a miss.
    ///
    /// Exactly one concurrent caller per key runs `fetch`; the others block
    /// until its result is published. A failed fetch degrades to the expired
    /// entry for the key when one exists.
    pub fn get_or_fetch<F>(&self, key: &MarketKey, fetch: F) -> CacheLookup
    where
        F: FnOnce() -> Result<MarketSnapshot, CollaboratorError>,
    {
        if let Some(snapshot) = self.fresh_entry(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return CacheLookup::Fresh(snapshot);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        // Join an in-flight fetch for this key, or claim the slot.
        let (slot, leader) = {
            let mut inflight = lock(&self.inflight);
            match inflight.get(key) {
                Some(slot) => (std::sync::Arc::clone(slot), false),
                None => {
                    let slot = std::sync::Arc::new(FlightSlot::new());
                    inflight.insert(key.clone(), std::sync::Arc::clone(&slot));
                    (slot, true)
                }
            }
        };

        let result = if leader {
            let result = fetch().map_err(|e| e.to_string());
            if let Ok(snapshot) = &result {
                lock(&self.entries).insert(
                    key.clone(),
                    CacheEntry {
                        snapshot: *snapshot,
                        fetched_at: Instant::now(),
                    },
                );
            }
            lock(&self.inflight).remove(key);
            slot.publish(result.clone());
            result
        } else {
            slot.wait()
        };

        match result {
            Ok(snapshot) => CacheLookup::Fetched(snapshot),
            Err(reason) => match self.any_entry(key) {
                Some(snapshot) => {
                    self.stale_served.fetch_add(1, Ordering::Relaxed);
                    CacheLookup::Stale(snapshot)
                }
                None => CacheLookup::Unavailable { reason },
            },
        }
    }

    /// Number of cached entries, fresh or expired.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries and reset statistics.
    pub fn clear(&self) {
        lock(&self.entries).clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stale_served.store(0, Ordering::Relaxed);
    }

    /// Cache hit rate over all lookups so far.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let total = hits + self.misses.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    fn fresh_entry(&self, key: &MarketKey) -> Option<MarketSnapshot> {
        let entries = lock(&self.entries);
        entries
            .get(key)
            .filter(|e| e.fetched_at.elapsed() <= self.ttl)
            .map(|e| e.snapshot)
    }

    fn any_entry(&self, key: &MarketKey) -> Option<MarketSnapshot> {
        lock(&self.entries).get(key).map(|e| e.snapshot)
    }
}

impl Default for MarketDataCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock recovering from poisoning; a panicked fetch must not wedge the cache.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
