//! Cache Configuration
//!
//! Configuration for [`LruCache`](crate::LruCache). Like the cache itself, the
//! configuration is fixed at construction time.
//!
//! # Sizing Guidelines
//!
//! `max_bytes` is the budget for the bytes *reported* by keys and values through
//! [`ByteLen`](crate::ByteLen). It does not include the cache's own bookkeeping:
//!
//! ```text
//! Total Memory ≈ max_bytes + (len × overhead_per_entry)
//! overhead_per_entry ≈ 48-96 bytes (index slot, arena links, charge)
//! ```
//!
//! A budget of `0` disables eviction entirely and the cache grows without bound.
//!
//! # Examples
//!
//! ```
//! use sized_lru::config::LruCacheConfig;
//! use sized_lru::LruCache;
//!
//! // 64MB budget for keys and values
//! let config = LruCacheConfig {
//!     max_bytes: 64 * 1024 * 1024,
//! };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.max_bytes(), 64 * 1024 * 1024);
//! ```

use core::fmt;

/// Configuration for a byte-budgeted LRU cache.
///
/// # Fields
///
/// - `max_bytes`: Ceiling on the sum of `key.byte_len() + value.byte_len()` over all
///   resident entries. `0` means unbounded.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum total bytes for resident keys and values. `0` disables eviction.
    pub max_bytes: u64,
}

impl LruCacheConfig {
    /// A configuration that never evicts.
    #[inline]
    pub const fn unbounded() -> Self {
        Self { max_bytes: 0 }
    }

    /// A configuration with the given byte budget.
    #[inline]
    pub const fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Returns true if the budget is enforced.
    #[inline]
    pub const fn is_bounded(&self) -> bool {
        self.max_bytes != 0
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}
