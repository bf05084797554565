//! Cache Entry Type
//!
//! A [`CacheEntry`] pairs a key and value with the number of bytes the cache
//! charged for them. The charge is computed once, when the entry is written, from
//! the [`ByteLen`] capability of the key and value:
//!
//! ```text
//! size = key.byte_len() + value.byte_len()
//! ```
//!
//! Releasing an entry subtracts exactly the recorded `size`, so the cache's running
//! byte total always equals the sum of the sizes of its resident entries.
//!
//! # Examples
//!
//! ```
//! use sized_lru::entry::CacheEntry;
//!
//! let entry = CacheEntry::new("key1", "1234");
//! assert_eq!(entry.size, 8);
//! ```

use crate::byte_len::ByteLen;
use core::fmt;

/// A resident key/value pair and the bytes it is charged for.
pub struct CacheEntry<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value
    pub value: V,

    /// Bytes charged against the byte budget: key length plus value length
    /// at the time the value was written.
    pub size: u64,
}

impl<K: ByteLen, V: ByteLen> CacheEntry<K, V> {
    /// Creates an entry and computes its charge from the key and value.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        let size = charge(&key, &value);
        Self { key, value, size }
    }

    /// Replaces the value, recomputes the charge, and returns the previous value
    /// together with its charge.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_lru::entry::CacheEntry;
    ///
    /// let mut entry = CacheEntry::new("key", "1");
    /// let (old, old_size) = entry.replace_value("111");
    /// assert_eq!(old, "1");
    /// assert_eq!(old_size, 4);
    /// assert_eq!(entry.size, 6);
    /// ```
    #[inline]
    pub fn replace_value(&mut self, value: V) -> (V, u64) {
        let size = charge(&self.key, &value);
        let old_size = core::mem::replace(&mut self.size, size);
        (core::mem::replace(&mut self.value, value), old_size)
    }
}

impl<K, V> CacheEntry<K, V> {
    /// Splits the entry into its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Bytes charged for a key/value pair.
#[inline]
pub(crate) fn charge<K: ByteLen + ?Sized, V: ByteLen + ?Sized>(key: &K, value: &V) -> u64 {
    key.byte_len() as u64 + value.byte_len() as u64
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("size", &self.size)
            .finish()
    }
}
