//! LRU Cache Metrics
//!
//! Metrics specific to the byte-budgeted LRU cache.

extern crate alloc;

use super::CoreCacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core counters common to byte-accounted caches
    pub core: CoreCacheMetrics,

    /// Number of times an entry moved to the most-recently-used position
    pub promotions: u64,

    /// Number of writes whose entry alone exceeded the byte budget
    pub oversized_admissions: u64,
}

impl LruCacheMetrics {
    /// Creates a zeroed set of LRU counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a move of an entry to the front of the recency order.
    #[inline]
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a write that could not fit the budget even in an empty cache.
    #[inline]
    pub fn record_oversized_admission(&mut self) {
        self.oversized_admissions += 1;
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert(
            "oversized_admissions".to_string(),
            self.oversized_admissions as f64,
        );
        metrics
    }
}
