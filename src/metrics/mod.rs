//! Cache Metrics System
//!
//! Counters describing how a cache has been used, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! Reports are `BTreeMap`s, so keys always appear in the same sorted order.
//!
//! # Counters vs. Live State
//!
//! The counters here only ever grow (until reset). The live byte view of a cache,
//! its current `used_bytes` and configured budget, is owned by the cache itself
//! and merged into the reported map by the cache's [`CacheMetrics`] impl.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to byte-accounted caches
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made against the cache
    pub requests: u64,

    /// Number of lookups that found a resident entry
    pub cache_hits: u64,

    /// Total bytes of entries found by lookups
    pub bytes_served_from_cache: u64,

    /// Number of entries inserted under a new key
    pub insertions: u64,

    /// Number of values replaced under an existing key
    pub updates: u64,

    /// Total bytes charged by insertions and updates
    pub bytes_written_to_cache: u64,

    /// Number of entries evicted, by budget overflow or explicit oldest-removal
    pub evictions: u64,

    /// Total bytes released by evictions
    pub bytes_evicted: u64,

    /// Number of entries removed by key
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found an entry charged `object_size` bytes.
    pub fn record_hit(&mut self, object_size: u64) {
        self.requests += 1;
        self.cache_hits += 1;
        self.bytes_served_from_cache += object_size;
    }

    /// Records a lookup that found nothing.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry charged `object_size` bytes.
    pub fn record_insertion(&mut self, object_size: u64) {
        self.insertions += 1;
        self.bytes_written_to_cache += object_size;
    }

    /// Records a value replacement; `new_size` is the entry's new charge.
    pub fn record_update(&mut self, new_size: u64) {
        self.updates += 1;
        self.bytes_written_to_cache += new_size;
    }

    /// Records the eviction of an entry charged `evicted_size` bytes.
    pub fn record_eviction(&mut self, evicted_size: u64) {
        self.evictions += 1;
        self.bytes_evicted += evicted_size;
    }

    /// Records removal of an entry by key.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Number of lookups that found nothing.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that were hits, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that were misses, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Evictions per lookup, or 0.0 before the first lookup.
    pub fn eviction_rate(&self) -> f64 {
        if self.requests > 0 {
            self.evictions as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        metrics.insert("eviction_rate".to_string(), self.eviction_rate());

        metrics.insert(
            "bytes_served_from_cache".to_string(),
            self.bytes_served_from_cache as f64,
        );
        metrics.insert(
            "bytes_written_to_cache".to_string(),
            self.bytes_written_to_cache as f64,
        );
        metrics.insert("bytes_evicted".to_string(), self.bytes_evicted as f64);

        metrics
    }
}

/// Uniform metrics reporting for caches.
///
/// Keys of the returned map are sorted, so two reports of the same cache state are
/// always identical.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name of the eviction algorithm, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
