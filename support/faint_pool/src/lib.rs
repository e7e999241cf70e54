//! A high-performance, non-thread-safe object pool.
//!
//! `Pool` is used as a scratch arena for tree-shaped data structures that are
//! built up and then discarded in one shot, such as the octree used by the
//! color quantizer. Nodes reference each other via [`PoolPtr`] instead of
//! native references, so the tree can contain cycles-free parent/child links
//! without fighting the borrow checker, and the whole arena is freed in a
//! single `Vec` deallocation when it's dropped.
use std::{mem, num::NonZeroUsize, ops};

/// A non-thread-safe object pool with stable indices.
///
/// Allocation reuses vacant slots left behind by `deallocate` before growing
/// the backing storage, so the pool's memory usage is bounded by the high
/// watermark of simultaneously live objects.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    storage: Vec<Entry<T>>,
    first_free: Option<PoolPtr>,
}

/// A pointer to an object in a [`Pool`].
///
/// `Pool` uses zero-based indices internally, but `PoolPtr` stores them
/// one-based so that `Option<PoolPtr>` is the same size as `PoolPtr`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct PoolPtr(NonZeroUsize);

#[derive(Debug, Clone)]
enum Entry<T> {
    Used(T),
    /// Vacant. Points to the next vacant entry, forming a free list headed by
    /// `Pool::first_free`.
    Free(Option<PoolPtr>),
}

impl<T> Entry<T> {
    fn as_ref(&self) -> Option<&T> {
        match self {
            Entry::Used(value) => Some(value),
            Entry::Free(_) => None,
        }
    }
    fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Entry::Used(value) => Some(value),
            Entry::Free(_) => None,
        }
    }
    fn next_free_index(&self) -> Option<PoolPtr> {
        match self {
            Entry::Used(_) => unreachable!(),
            Entry::Free(i) => *i,
        }
    }
}

impl PoolPtr {
    fn new(x: usize) -> Self {
        PoolPtr(NonZeroUsize::new(x + 1).expect("count overflow"))
    }

    fn get(self) -> usize {
        self.0.get() - 1
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub const fn new() -> Self {
        Self {
            storage: Vec::new(),
            first_free: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            first_free: None,
        }
    }

    pub fn len(&self) -> usize {
        self.storage
            .iter()
            .filter(|e| matches!(e, Entry::Used(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocate a new entry, returning a stable pointer to it.
    pub fn allocate(&mut self, x: T) -> PoolPtr {
        match self.first_free {
            None => {
                self.storage.push(Entry::Used(x));
                PoolPtr::new(self.storage.len() - 1)
            }
            Some(i) => {
                let idx = i.get();
                self.first_free = self.storage[idx].next_free_index();
                self.storage[idx] = Entry::Used(x);
                PoolPtr::new(idx)
            }
        }
    }

    /// Deallocate the entry pointed to by `ptr`. Returns `None` if the
    /// pointer is dangling (already deallocated).
    pub fn deallocate(&mut self, ptr: PoolPtr) -> Option<T> {
        let entry = &mut self.storage[ptr.get()];
        if let Entry::Free(_) = entry {
            return None;
        }
        let x = match mem::replace(entry, Entry::Free(self.first_free)) {
            Entry::Used(x) => x,
            Entry::Free(_) => unreachable!(),
        };
        self.first_free = Some(ptr);
        Some(x)
    }

    pub fn get(&self, ptr: PoolPtr) -> Option<&T> {
        self.storage.get(ptr.get())?.as_ref()
    }

    pub fn get_mut(&mut self, ptr: PoolPtr) -> Option<&mut T> {
        self.storage.get_mut(ptr.get())?.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ T> + '_ {
        self.storage.iter().filter_map(Entry::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut T> + '_ {
        self.storage.iter_mut().filter_map(Entry::as_mut)
    }

    pub fn ptr_iter(&self) -> impl Iterator<Item = (PoolPtr, &'_ T)> + '_ {
        self.storage
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|x| (PoolPtr::new(i), x)))
    }
}

impl<T> ops::Index<PoolPtr> for Pool<T> {
    type Output = T;

    fn index(&self, index: PoolPtr) -> &Self::Output {
        self.get(index).expect("dangling ptr")
    }
}

impl<T> ops::IndexMut<PoolPtr> for Pool<T> {
    fn index_mut(&mut self, index: PoolPtr) -> &mut Self::Output {
        self.get_mut(index).expect("dangling ptr")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_index() {
        let mut pool = Pool::new();
        let ptr1 = pool.allocate(1);
        let ptr2 = pool.allocate(2);
        assert_eq!(pool[ptr1], 1);
        assert_eq!(pool[ptr2], 2);

        assert_eq!(pool.iter().cloned().collect::<Vec<_>>(), vec![1, 2]);
        pool.deallocate(ptr1);
        assert_eq!(pool.iter().cloned().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn reuses_deallocated_slot() {
        let mut pool = Pool::new();
        let ptr1 = pool.allocate(1);
        pool.deallocate(ptr1);
        let ptr2 = pool.allocate(2);
        assert_eq!(pool[ptr2], 2);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    #[should_panic]
    fn dangling_ptr_panics() {
        let mut pool = Pool::new();
        let ptr = pool.allocate(1);
        pool.deallocate(ptr);
        let _ = pool[ptr];
    }

    #[quickcheck_macros::quickcheck]
    fn len_matches_live_count(ops: Vec<bool>) -> bool {
        let mut pool = Pool::new();
        let mut live = Vec::new();
        for (i, alloc) in ops.into_iter().enumerate() {
            if alloc || live.is_empty() {
                live.push(pool.allocate(i));
            } else {
                let ptr = live.pop().unwrap();
                pool.deallocate(ptr);
            }
        }
        pool.len() == live.len()
    }
}
