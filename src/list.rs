//! Index-addressed doubly linked list.
//!
//! Nodes live in a `Vec` arena and link to each other by slot index, so moving a
//! node to the front or unlinking it from the back is O(1) without raw pointers.
//! Slots freed by removal are threaded onto a free list and reused by later
//! insertions, which keeps the arena no larger than the peak number of entries.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

/// Link value meaning "no node".
const NIL: usize = usize::MAX;

/// Stable address of a node in a [`List`].
///
/// A handle stays valid until its node is removed. After that the slot may be
/// reused, so callers must drop handles for removed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle(usize);

/// A slot in the arena.
///
/// `val` is `None` for free slots, whose `next` link chains the free list.
struct Entry<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked list whose nodes are stored in a reusable arena.
///
/// The front holds the most recently attached node and the back the oldest one.
pub(crate) struct List<T> {
    entries: Vec<Entry<T>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub(crate) fn new() -> List<T> {
        List {
            entries: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    /// Returns the current number of nodes in the list.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated in the arena, free or occupied.
    #[inline]
    #[cfg(test)]
    pub(crate) fn slots(&self) -> usize {
        self.entries.len()
    }

    /// Adds a value to the front of the list and returns its handle.
    pub(crate) fn add(&mut self, v: T) -> Handle {
        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.entries[idx].next;
            self.entries[idx] = Entry {
                val: Some(v),
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            self.entries.push(Entry {
                val: Some(v),
                prev: NIL,
                next: NIL,
            });
            self.entries.len() - 1
        };
        self.attach(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Removes the last (least recently attached) node and returns its value.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(Handle(self.tail))
    }

    /// Removes the node behind `node` and returns its value.
    ///
    /// Returns `None` if the handle does not address an occupied slot.
    pub(crate) fn remove(&mut self, node: Handle) -> Option<T> {
        let idx = node.0;
        if !self.is_occupied(idx) {
            return None;
        }
        self.detach(idx);
        let entry = &mut self.entries[idx];
        let val = entry.val.take();
        entry.next = self.free;
        self.free = idx;
        self.len -= 1;
        val
    }

    /// Moves a node to the front of the list.
    pub(crate) fn move_to_front(&mut self, node: Handle) {
        let idx = node.0;
        if idx == self.head || !self.is_occupied(idx) {
            return;
        }
        self.detach(idx);
        self.attach(idx);
    }

    /// Returns a reference to the value of a node.
    #[inline]
    pub(crate) fn get(&self, node: Handle) -> Option<&T> {
        self.entries.get(node.0)?.val.as_ref()
    }

    /// Returns a mutable reference to the value of a node.
    #[inline]
    pub(crate) fn get_mut(&mut self, node: Handle) -> Option<&mut T> {
        self.entries.get_mut(node.0)?.val.as_mut()
    }

    /// Returns the value at the front of the list.
    #[inline]
    #[cfg(test)]
    pub(crate) fn front(&self) -> Option<&T> {
        self.get(Handle(self.head))
    }

    /// Returns the value at the back of the list.
    #[inline]
    pub(crate) fn back(&self) -> Option<&T> {
        self.get(Handle(self.tail))
    }

    /// Iterates values from front to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            entries: &self.entries,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Removes every node and releases the arena.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    #[inline]
    fn is_occupied(&self, idx: usize) -> bool {
        self.entries.get(idx).is_some_and(|e| e.val.is_some())
    }

    /// Unlinks a node from its neighbours without freeing the slot.
    fn detach(&mut self, idx: usize) {
        let prev = self.entries[idx].prev;
        let next = self.entries[idx].next;

        if prev != NIL {
            self.entries[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.entries[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.entries[idx].prev = NIL;
        self.entries[idx].next = NIL;
    }

    /// Links a detached node in as the new front.
    fn attach(&mut self, idx: usize) {
        self.entries[idx].prev = NIL;
        self.entries[idx].next = self.head;

        if self.head != NIL {
            self.entries[self.head].prev = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.entries.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    entries: &'a [Entry<T>],
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL || self.remaining == 0 {
            return None;
        }
        let entry = &self.entries[self.current];
        self.current = entry.next;
        self.remaining -= 1;
        entry.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn collect(list: &List<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_add_items() {
        let mut list = List::<u32>::new();
        let node1 = list.add(10);
        let node2 = list.add(20);
        assert_eq!(list.len(), 2);
        assert_ne!(node1, node2);
        assert_eq!(collect(&list), vec![20, 10]);
    }

    #[test]
    fn test_get_value() {
        let mut list = List::<String>::new();
        let node = list.add(String::from("test"));
        assert_eq!(list.get(node).unwrap(), "test");

        list.get_mut(node).unwrap().push_str("_modified");
        assert_eq!(list.get(node).unwrap(), "test_modified");
    }

    #[test]
    fn test_remove_last() {
        let mut list = List::<u32>::new();
        assert!(list.remove_last().is_none());

        list.add(10);
        list.add(20);
        list.add(30);

        assert_eq!(list.remove_last(), Some(10));
        assert_eq!(list.remove_last(), Some(20));
        assert_eq!(list.remove_last(), Some(30));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::<u32>::new();

        // front->30->20->10->back
        let node1 = list.add(10);
        let _node2 = list.add(20);
        let node3 = list.add(30);

        list.move_to_front(node1);
        assert_eq!(collect(&list), vec![10, 30, 20]);

        // Already at the front
        list.move_to_front(node1);
        assert_eq!(collect(&list), vec![10, 30, 20]);

        list.move_to_front(node3);
        assert_eq!(collect(&list), vec![30, 10, 20]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.back(), Some(&20));
        assert_eq!(list.front(), Some(&30));
    }

    #[test]
    fn test_remove_middle_keeps_links() {
        let mut list = List::<u32>::new();
        list.add(10);
        let node2 = list.add(20);
        list.add(30);

        assert_eq!(list.remove(node2), Some(20));
        assert_eq!(collect(&list), vec![30, 10]);
        assert_eq!(list.remove(node2), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = List::<u32>::new();
        list.add(1);
        list.add(2);
        list.add(3);
        assert_eq!(list.slots(), 3);

        for i in 0..100 {
            list.remove_last();
            list.add(i);
        }
        assert_eq!(list.len(), 3);
        assert_eq!(list.slots(), 3);
        assert_eq!(collect(&list), vec![99, 98, 97]);
    }

    #[test]
    fn test_stale_handle_operations_are_ignored() {
        let mut list = List::<u32>::new();
        let node = list.add(10);
        list.add(20);
        list.remove(node);

        list.move_to_front(node);
        assert_eq!(list.get(node), None);
        assert_eq!(collect(&list), vec![20]);
    }

    #[test]
    fn test_clear() {
        let mut list = List::<u32>::new();
        list.add(10);
        list.add(20);
        list.add(30);

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);

        list.add(40);
        assert_eq!(collect(&list), vec![40]);
    }

    #[test]
    fn test_iter_is_exact_size() {
        let mut list = List::<u32>::new();
        list.add(1);
        list.add(2);
        let iter = list.iter();
        assert_eq!(iter.len(), 2);
    }
}
