//! Byte Length Capability
//!
//! Every key and value stored in an [`LruCache`](crate::LruCache) reports how many
//! bytes it accounts for through the [`ByteLen`] trait. The cache charges
//! `key.byte_len() + value.byte_len()` against its byte budget when an entry is
//! written and releases exactly that amount when the entry leaves.
//!
//! # Contract
//!
//! The reported length must stay the same for a given instance for as long as it
//! is resident in a cache. Replacing a value through
//! [`LruCache::add`](crate::LruCache::add) is the only supported way to change the
//! bytes charged for a key. Interior mutability that changes the reported length
//! while the value is cached is a logic error: the cache stays memory safe, but
//! its byte budget will no longer reflect the resident data.
//!
//! # Implementing
//!
//! ```
//! use sized_lru::ByteLen;
//!
//! struct Thumbnail {
//!     pixels: Vec<u8>,
//!     name: String,
//! }
//!
//! impl ByteLen for Thumbnail {
//!     fn byte_len(&self) -> usize {
//!         self.pixels.len() + self.name.len()
//!     }
//! }
//! ```

extern crate alloc;

use alloc::borrow::{Cow, ToOwned};
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::mem;

/// Reports the number of bytes a key or value occupies for cache accounting.
pub trait ByteLen {
    /// Returns the number of bytes charged against a cache's byte budget.
    fn byte_len(&self) -> usize;
}

impl ByteLen for str {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for String {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for [u8] {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for Vec<u8> {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl<const N: usize> ByteLen for [u8; N] {
    #[inline]
    fn byte_len(&self) -> usize {
        N
    }
}

impl ByteLen for char {
    #[inline]
    fn byte_len(&self) -> usize {
        self.len_utf8()
    }
}

macro_rules! impl_byte_len_for_int {
    ($($t:ty),*) => {
        $(
            impl ByteLen for $t {
                #[inline]
                fn byte_len(&self) -> usize {
                    mem::size_of::<$t>()
                }
            }
        )*
    };
}

impl_byte_len_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<T: ByteLen + ?Sized> ByteLen for &T {
    #[inline]
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for &mut T {
    #[inline]
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for Box<T> {
    #[inline]
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for Rc<T> {
    #[inline]
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for Arc<T> {
    #[inline]
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T> ByteLen for Cow<'_, T>
where
    T: ByteLen + ToOwned + ?Sized,
{
    #[inline]
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_strings_report_utf8_length() {
        assert_eq!("key1".byte_len(), 4);
        assert_eq!("héllo".to_string().byte_len(), 6);
        assert_eq!('é'.byte_len(), 2);
    }

    #[test]
    fn test_bytes_report_length() {
        assert_eq!(vec![0u8; 16].byte_len(), 16);
        assert_eq!([7u8; 3].byte_len(), 3);
        assert_eq!((&b"abcd"[..]).byte_len(), 4);
    }

    #[test]
    fn test_integers_report_width() {
        assert_eq!(1u8.byte_len(), 1);
        assert_eq!(1u32.byte_len(), 4);
        assert_eq!((-1i64).byte_len(), 8);
    }

    #[test]
    fn test_smart_pointers_delegate() {
        let shared: Arc<str> = Arc::from("value");
        assert_eq!(shared.byte_len(), 5);
        let counted: Rc<[u8]> = Rc::from(&[1u8, 2, 3][..]);
        assert_eq!(counted.byte_len(), 3);
        let boxed: Box<str> = "ab".into();
        assert_eq!(boxed.byte_len(), 2);
        let borrowed: Cow<'_, str> = Cow::Borrowed("abc");
        assert_eq!(borrowed.byte_len(), 3);
        let owned: Cow<'_, str> = Cow::Owned("abcd".to_string());
        assert_eq!(owned.byte_len(), 4);
    }
}
