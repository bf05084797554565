#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Byte Accounting
//!
//! Capacity is a budget in bytes. Each entry is charged the byte length of its key
//! plus the byte length of its value, as reported by [`ByteLen`]:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  LruCache { max_bytes: 20 }                                      │
//! │                                                                  │
//! │   front (MRU)                                        back (LRU)  │
//! │   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │   │ "k3" + "v3"  │◄─►│ "k2" + "v2"  │◄─►│"key1"+"12345"│         │
//! │   │   4 bytes    │   │   4 bytes    │   │   9 bytes    │         │
//! │   └──────────────┘   └──────────────┘   └──────────────┘         │
//! │                                                                  │
//! │   used_bytes = 17                       next eviction ──────▲    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `max_bytes = 0` means unbounded: nothing is ever evicted automatically.
//!
//! ## Quick Reference
//!
//! | Operation | Effect on recency | Eviction callback |
//! |-----------|-------------------|-------------------|
//! | [`LruCache::add`] | key becomes most recently used | for every entry evicted to fit the budget |
//! | [`LruCache::get`] | key becomes most recently used on a hit | never |
//! | [`LruCache::remove_oldest`] | removes the least recently used entry | once, if an entry was removed |
//! | [`LruCache::peek`] / [`LruCache::contains`] | none | never |
//! | [`LruCache::remove`] | removes the key | never, the value is returned |
//! | [`LruCache::clear`] | removes everything | never |
//!
//! ## Performance Characteristics
//!
//! | Operation | Time | Allocates |
//! |-----------|------|-----------|
//! | get / peek / contains | O(1) | no |
//! | add (new key) | O(1) amortized + O(1) per eviction | key clone, arena growth |
//! | add (existing key) | O(1) + O(1) per eviction | no |
//! | remove / remove_oldest | O(1) | no |
//!
//! ## Code Examples
//!
//! ### Eviction callback
//!
//! ```rust
//! use sized_lru::LruCache;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let mut cache: LruCache<String, Vec<u8>> =
//!     LruCache::with_eviction_callback(16, move |key: String, value: Vec<u8>| {
//!         let _ = tx.send((key, value.len()));
//!     });
//!
//! cache.add("a".to_string(), vec![0; 8]);
//! cache.add("b".to_string(), vec![0; 8]);
//!
//! // "a" is reported once "b" pushes the total past 16 bytes
//! assert_eq!(rx.try_recv(), Ok(("a".to_string(), 8)));
//! assert!(rx.try_recv().is_err());
//! ```
//!
//! ### Configuration and metrics
//!
//! ```rust
//! use sized_lru::config::LruCacheConfig;
//! use sized_lru::metrics::CacheMetrics;
//! use sized_lru::LruCache;
//!
//! let config = LruCacheConfig { max_bytes: 1024 };
//! let mut cache: LruCache<&str, &str> = LruCache::init(config, None);
//!
//! cache.add("page", "contents");
//! cache.get("page");
//! cache.get("missing");
//!
//! let metrics = cache.metrics();
//! assert_eq!(metrics["cache_hits"], 1.0);
//! assert_eq!(metrics["cache_misses"], 1.0);
//! assert_eq!(metrics["cache_size_bytes"], 12.0);
//! ```
//!
//! ### Sharing between threads
//!
//! The cache has no internal locking. Wrap it in a mutex to share it:
//!
//! ```rust
//! use sized_lru::LruCache;
//! use std::sync::{Arc, Mutex};
//!
//! let cache = Arc::new(Mutex::new(LruCache::new(1 << 20)));
//!
//! let writer = Arc::clone(&cache);
//! std::thread::spawn(move || {
//!     writer.lock().unwrap().add("key".to_string(), 42u64);
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(cache.lock().unwrap().get("key"), Some(&42));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: The byte-budgeted LRU cache
//! - [`byte_len`]: The [`ByteLen`] capability and implementations for common types
//! - [`entry`]: Resident entries and their byte charge
//! - [`config`]: Cache configuration
//! - [`metrics`]: Usage counters and reporting

#![no_std]
#![forbid(unsafe_code)]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Byte length capability for keys and values.
///
/// Defines the [`ByteLen`] trait the cache uses to charge entries against its
/// byte budget, with implementations for strings, byte buffers, integers and
/// common smart pointers.
pub mod byte_len;

/// Resident cache entry type.
///
/// Provides `CacheEntry<K, V>`, which holds a key, a value and the number of bytes
/// the pair was charged when written.
pub mod entry;

/// Index-addressed doubly linked list used for recency ordering.
///
/// **Note**: This module is internal infrastructure. Handles into the list are only
/// meaningful to the cache that owns it.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Byte-budgeted Least Recently Used (LRU) cache implementation.
///
/// Provides a cache that evicts the least recently used entries whenever the
/// total byte length of its keys and values exceeds a configured budget.
pub mod lru;

/// Cache metrics system.
///
/// Provides usage counters and a common reporting interface.
pub mod metrics;

pub use byte_len::ByteLen;
pub use config::LruCacheConfig;
pub use entry::CacheEntry;
pub use lru::{EvictionCallback, LruCache};
pub use metrics::CacheMetrics;
