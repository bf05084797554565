//! Byte-Budgeted Least Recently Used (LRU) Cache
//!
//! This module provides [`LruCache`], an LRU cache whose capacity is a budget in
//! bytes rather than a number of entries. Every entry is charged
//! `key.byte_len() + value.byte_len()` (see [`ByteLen`]) and the cache evicts from
//! the least recently used end until the charged total fits the budget again.
//!
//! # Algorithm
//!
//! Entries are kept in a recency list, front = most recently used. A hash index
//! maps each key to its node in the list.
//!
//! ```text
//!   add("k4", "v4") with max_bytes = 10, used_bytes = 10
//!
//!   Before:
//!     front ──► [k3:4] ◄──► [k2:4] ◄──► [a:2] ◄── back         used = 10
//!
//!   1. Push [k4:4] at the front                                  used = 14
//!   2. 14 > 10: evict [a:2] from the back                        used = 12
//!   3. 12 > 10: evict [k2:4] from the back                       used = 8
//!
//!   After:
//!     front ──► [k4:4] ◄──► [k3:4] ◄── back                      used = 8
//! ```
//!
//! Eviction runs in a loop because a single write can overflow the budget by more
//! than one older entry's charge. An entry that alone exceeds the budget is
//! admitted and then evicted by the same loop, after everything older than it.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Add: O(1) amortized, plus O(1) per evicted entry
//!   - Remove / RemoveOldest: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) in the number of resident entries. Slots freed by eviction are reused,
//!     so the arena never grows past the peak entry count.
//!
//! # Eviction Callback
//!
//! An optional [`EvictionCallback`] receives ownership of every evicted key and
//! value, synchronously, in eviction order, before the triggering call returns.
//! Explicit removal by key and [`LruCache::clear`] are not evictions and do not
//! invoke it.
//!
//! # Thread Safety
//!
//! This cache is single-owner and has no internal locking: every operation that
//! changes recency takes `&mut self`. For concurrent access, wrap it in a mutex or
//! hand it to a single worker that owns it. The callback runs on the caller's
//! thread while the cache is borrowed, so it cannot re-enter the cache it is
//! attached to.

extern crate alloc;

use crate::byte_len::ByteLen;
use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{self, Handle, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Function notified of every evicted entry.
///
/// It receives ownership of the evicted key and value. It is called at most once
/// per entry, never concurrently with itself, and always from inside the
/// [`LruCache::add`] or [`LruCache::remove_oldest`] call that caused the eviction.
pub type EvictionCallback<K, V> = Box<dyn FnMut(K, V) + Send>;

/// A least recently used cache bounded by a byte budget.
///
/// # Examples
///
/// ```
/// use sized_lru::LruCache;
///
/// // "key1" + "value1" + "key2" + "value2" = 20 bytes
/// let mut cache = LruCache::new(20);
///
/// cache.add("key1", "value1");
/// cache.add("key2", "value2");
/// assert_eq!(cache.used_bytes(), 20);
///
/// // Reading "key1" makes "key2" the least recently used entry
/// assert_eq!(cache.get("key1"), Some(&"value1"));
///
/// // 24 bytes would exceed the budget, so "key2" is evicted
/// cache.add("k3", "v3");
/// assert_eq!(cache.get("key2"), None);
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.used_bytes(), 14);
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<CacheEntry<K, V>>,
    map: HashMap<K, Handle, S>,
    used_bytes: u64,
    on_evicted: Option<EvictionCallback<K, V>>,
    metrics: LruCacheMetrics,
}

impl<K, V> LruCache<K, V> {
    /// Creates an empty cache with the given byte budget and no eviction callback.
    ///
    /// A budget of `0` disables eviction.
    pub fn new(max_bytes: u64) -> Self {
        Self::init(LruCacheConfig::with_max_bytes(max_bytes), None)
    }

    /// Creates an empty cache that reports every evicted entry to `on_evicted`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_lru::LruCache;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let evicted = Arc::new(Mutex::new(Vec::new()));
    /// let log = Arc::clone(&evicted);
    /// let mut cache: LruCache<&str, &str> =
    ///     LruCache::with_eviction_callback(10, move |key, _value| {
    ///         log.lock().unwrap().push(key);
    ///     });
    ///
    /// cache.add("key1", "123456");
    /// cache.add("k2", "k2");
    /// cache.add("k3", "k3");
    /// cache.add("k4", "k4");
    /// assert_eq!(*evicted.lock().unwrap(), vec!["key1", "k2"]);
    /// ```
    pub fn with_eviction_callback<F>(max_bytes: u64, on_evicted: F) -> Self
    where
        F: FnMut(K, V) + Send + 'static,
    {
        Self::init(
            LruCacheConfig::with_max_bytes(max_bytes),
            Some(Box::new(on_evicted)),
        )
    }

    /// Creates an empty cache from a configuration and an optional eviction callback.
    ///
    /// Both are fixed for the lifetime of the cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_lru::config::LruCacheConfig;
    /// use sized_lru::LruCache;
    ///
    /// let config = LruCacheConfig { max_bytes: 1024 };
    /// let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(config: LruCacheConfig, on_evicted: Option<EvictionCallback<K, V>>) -> Self {
        Self::init_with_hasher(config, on_evicted, DefaultHashBuilder::default())
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Creates an empty cache that hashes keys with `hash_builder`.
    pub fn init_with_hasher(
        config: LruCacheConfig,
        on_evicted: Option<EvictionCallback<K, V>>,
        hash_builder: S,
    ) -> Self {
        LruCache {
            config,
            list: List::new(),
            map: HashMap::with_hasher(hash_builder),
            used_bytes: 0,
            on_evicted,
            metrics: LruCacheMetrics::new(),
        }
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the bytes currently charged: the sum of `key.byte_len() + value.byte_len()`
    /// over all resident entries.
    #[inline]
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    /// Returns the byte budget. `0` means unbounded.
    #[inline]
    pub fn max_bytes(&self) -> u64 {
        self.config.max_bytes
    }

    /// Returns the configuration the cache was built with.
    #[inline]
    pub fn config(&self) -> &LruCacheConfig {
        &self.config
    }

    /// Returns the least recently used entry, the next one to be evicted, without
    /// promoting it.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterates over resident entries from most to least recently used.
    ///
    /// Iteration does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Returns the usage counters collected so far.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Resets the usage counters. Resident entries are not affected.
    pub fn reset_metrics(&mut self) {
        self.metrics = LruCacheMetrics::new();
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone + ByteLen,
    V: ByteLen,
    S: BuildHasher,
{
    /// Inserts or replaces the value for `key` and marks it most recently used.
    ///
    /// Replacing a value adjusts the byte total by the difference between the new
    /// and old value lengths. Afterwards, while the budget is enforced and exceeded,
    /// the least recently used entry is evicted and reported to the eviction
    /// callback.
    pub fn add(&mut self, key: K, value: V) {
        let size = match self.map.get(&key).copied() {
            Some(node) => self.replace(node, value),
            None => self.insert(key, value),
        };

        if self.config.is_bounded() && size > self.config.max_bytes {
            self.metrics.record_oversized_admission();
            debug!(
                bytes = size,
                max_bytes = self.config.max_bytes,
                "entry exceeds the byte budget on its own and will be evicted"
            );
        }

        self.evict_to_budget();
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A lookup counts as use even though the value is unchanged. A miss leaves
    /// the cache contents untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(node) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };

        self.list.move_to_front(node);
        self.metrics.record_promotion();
        let entry = self.list.get(node)?;
        self.metrics.core.record_hit(entry.size);
        Some(&entry.value)
    }

    /// Returns the value for `key` without changing recency or metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.list.get(node).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is resident, without changing recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Evicts the least recently used entry and reports it to the eviction callback.
    ///
    /// Does nothing on an empty cache.
    pub fn remove_oldest(&mut self) {
        self.evict_oldest();
    }

    /// Removes `key` and returns its value.
    ///
    /// This is not an eviction: the eviction callback is not invoked, the caller
    /// receives the value instead.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        let entry = self.list.remove(node)?;
        self.release(entry.size);
        self.metrics.core.record_removal();
        Some(entry.value)
    }

    /// Drops every entry without invoking the eviction callback.
    pub fn clear(&mut self) {
        let entries = self.list.len();
        self.map.clear();
        self.list.clear();
        self.used_bytes = 0;
        debug!(entries, "cleared cache");
    }

    /// Replaces the value behind `node`, promotes it, and returns the new charge.
    fn replace(&mut self, node: Handle, value: V) -> u64 {
        debug_assert!(
            self.list.get(node).is_some(),
            "key index points at a free slot"
        );
        let Some(entry) = self.list.get_mut(node) else {
            return 0;
        };
        let (_old, old_size) = entry.replace_value(value);
        let new_size = entry.size;
        self.release(old_size);
        self.used_bytes += new_size;

        self.list.move_to_front(node);
        self.metrics.record_promotion();
        self.metrics.core.record_update(new_size);
        new_size
    }

    /// Links a new entry in at the front and returns its charge.
    fn insert(&mut self, key: K, value: V) -> u64 {
        let entry = CacheEntry::new(key.clone(), value);
        let size = entry.size;
        let node = self.list.add(entry);
        self.map.insert(key, node);
        self.used_bytes += size;
        self.metrics.core.record_insertion(size);
        size
    }

    fn evict_to_budget(&mut self) {
        while self.config.is_bounded() && self.used_bytes > self.config.max_bytes {
            if !self.evict_oldest() {
                break;
            }
        }
    }

    /// Unlinks the back entry, settles its bytes, then hands it to the callback.
    ///
    /// Returns `false` if the cache was empty.
    fn evict_oldest(&mut self) -> bool {
        let Some(entry) = self.list.remove_last() else {
            return false;
        };
        self.map.remove(&entry.key);
        self.release(entry.size);
        self.metrics.core.record_eviction(entry.size);
        trace!(
            bytes = entry.size,
            used_bytes = self.used_bytes,
            remaining = self.list.len(),
            "evicted least recently used entry"
        );

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            let (key, value) = entry.into_parts();
            on_evicted(key, value);
        }
        true
    }

    #[inline]
    fn release(&mut self, size: u64) {
        debug_assert!(
            self.used_bytes >= size,
            "byte accounting underflow: releasing {} of {}",
            size,
            self.used_bytes
        );
        self.used_bytes -= size;
    }
}

impl<K, V, S> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap();

        metrics.insert("entries".to_string(), self.len() as f64);
        metrics.insert("cache_size_bytes".to_string(), self.used_bytes as f64);
        metrics.insert(
            "max_cache_size_bytes".to_string(),
            self.config.max_bytes as f64,
        );
        let utilization = if self.config.is_bounded() {
            self.used_bytes as f64 / self.config.max_bytes as f64
        } else {
            0.0
        };
        metrics.insert("cache_utilization".to_string(), utilization);

        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.config.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.list.len())
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}

/// Iterator over cache entries from most to least recently used.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, CacheEntry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("inner", &self.inner).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
