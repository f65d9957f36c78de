//! Index arenas for the compiler.
//!
//! Types, functions and scopes are stored in flat vectors and referenced by
//! lightweight integer handles. Cross references between them (a placeholder
//! redirected to its definition, a scope pointing at its parent) are plain
//! index rewrites, so the structures stay free of reference cycles.

use std::fmt;
use std::marker::PhantomData;

/// A handle that indexes into an [`Arena`].
pub trait ArenaId: Copy + Eq {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

/// A growable arena of `T` values addressed by `I` handles.
///
/// Values are never removed, so a handle stays valid for the lifetime of
/// the arena that produced it.
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    _marker: PhantomData<fn(I) -> I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Create an empty arena with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Store a value and return its handle.
    #[inline]
    pub fn alloc(&mut self, value: T) -> I {
        let id = I::from_index(self.items.len());
        self.items.push(value);
        id
    }

    #[inline]
    pub fn get(&self, id: I) -> &T {
        &self.items[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.index()]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(handle, value)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (I::from_index(index), item))
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T: fmt::Debug> fmt::Debug for Arena<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<I: ArenaId, T: Clone> Clone for Arena<I, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TypeId;

    #[test]
    fn test_alloc_returns_sequential_ids() {
        let mut arena: Arena<TypeId, &str> = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(*arena.get(b), "b");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_iter_preserves_allocation_order() {
        let mut arena: Arena<TypeId, u32> = Arena::new();
        arena.alloc(10);
        arena.alloc(20);
        *arena.get_mut(TypeId(0)) += 1;

        let items: Vec<_> = arena.iter().map(|(id, v)| (id.0, *v)).collect();
        assert_eq!(items, vec![(0, 11), (1, 20)]);
    }
}
