//! Fast, but limited allocator used to store the nodes of a tree.

use std::collections::TryReserveError;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object allocated in a `TypedArena<T>`.
///
/// Handles are small, copyable, and remain valid until the object they refer to is freed. A
/// freed handle may be handed out again by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// Objects are stored in fixed-size chunks, so growing the arena never moves an existing object.
/// Freed blocks are kept on an intrusive free list and reused before a new chunk is requested.
/// Dropping or clearing the arena drops every live object without recursion.
///
/// # Examples
///
/// ```
/// use rbtree_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: &Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk. A
    /// chunk size of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// // creates a new TypedArena<T> that contains a maximum of 1024 u32's per chunk
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            len: 0,
            capacity: 0,
        }
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the total number of blocks that have been reserved, live or vacant.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn place(&mut self, value: T) -> Handle {
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied(value));
                Handle {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );

                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    },
                    Block::Occupied(_) => panic!("Expected head of free list to be vacant."),
                }
            },
        }
    }

    fn is_full(&self) -> bool {
        self.head.is_none() && self.len == self.capacity
    }

    /// Allocates an object in the typed arena and returns a `Handle`. The handle can later be
    /// used to retrieve mutable and immutable references to the object, and to deallocate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.is_full() {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.place(value)
    }

    /// Allocates an object in the typed arena, reporting an error instead of aborting if a new
    /// chunk cannot be reserved. The arena is left unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.try_allocate(7).unwrap();
    /// assert_eq!(arena[x], 7);
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Handle, TryReserveError> {
        if self.is_full() {
            let mut chunk = Vec::new();
            chunk.try_reserve_exact(self.chunk_size)?;
            self.chunks.try_reserve(1)?;
            self.chunks.push(chunk);
            self.capacity += self.chunk_size;
        }
        Ok(self.place(value))
    }

    /// Deallocates an object in the typed arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if handle corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        if let Block::Vacant(_) = self.chunks[handle.chunk_index][handle.block_index] {
            panic!("Error: attempting to free vacant block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head),
        );
        match old_block {
            Block::Vacant(_) => unreachable!(),
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(*handle);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the handle
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// *arena.get_mut(&x).unwrap() = 3;
    /// assert_eq!(arena.get(&x), Some(&3));
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Drops every object in the arena and releases all chunks.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.head = None;
        self.len = 0;
        self.capacity = 0;
    }

    /// Returns an iterator over every live object together with its handle, in allocation slot
    /// order. The walk visits every reserved block, live or vacant.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> + '_ {
        self.chunks
            .iter_mut()
            .enumerate()
            .flat_map(|(chunk_index, chunk)| {
                chunk
                    .iter_mut()
                    .enumerate()
                    .filter_map(move |(block_index, block)| {
                        match block {
                            Block::Occupied(value) => {
                                let handle = Handle {
                                    chunk_index,
                                    block_index,
                                };
                                Some((handle, value))
                            },
                            Block::Vacant(_) => None,
                        }
                    })
            })
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;
    use super::TypedArena;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(&Handle {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_free_twice() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        arena.free(&handle);
        arena.free(&handle);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        let handles: Vec<Handle> = (0..5).map(|i| arena.allocate(i)).collect();
        assert_eq!(arena.len(), 5);
        assert_eq!(arena.capacity(), 6);
        assert_eq!(
            handles[2],
            Handle {
                chunk_index: 1,
                block_index: 0
            },
        );
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(arena[*handle], i);
        }
    }

    #[test]
    fn test_free_list_reuse() {
        let mut arena = TypedArena::new(4);
        let a = arena.allocate('a');
        let b = arena.allocate('b');
        arena.allocate('c');

        assert_eq!(arena.free(&a), 'a');
        assert_eq!(arena.free(&b), 'b');
        assert_eq!(arena.get(&a), None);

        // most recently freed block is reused first
        assert_eq!(arena.allocate('d'), b);
        assert_eq!(arena.allocate('e'), a);
        assert_eq!(arena.capacity(), 4);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_try_allocate() {
        let mut arena = TypedArena::new(1);
        let x = arena.try_allocate(1).unwrap();
        let y = arena.try_allocate(2).unwrap();
        assert_eq!(arena[x] + arena[y], 3);
        assert_eq!(arena.capacity(), 2);
    }

    #[test]
    fn test_try_allocate_failure() {
        let mut arena: TypedArena<u64> = TypedArena::new(usize::MAX / 2);
        assert!(arena.try_allocate(1).is_err());
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 0);
    }

    #[test]
    fn test_zero_chunk_size() {
        let mut arena = TypedArena::new(0);
        assert_eq!(arena.chunk_size(), 1);
        let x = arena.allocate(5);
        assert_eq!(arena[x], 5);
    }

    #[test]
    fn test_iter_mut_skips_vacant() {
        let mut arena = TypedArena::new(2);
        let a = arena.allocate(1);
        let b = arena.allocate(2);
        let c = arena.allocate(3);
        arena.free(&a);

        let handles: Vec<Handle> = arena.iter_mut().map(|(handle, _)| handle).collect();
        assert_eq!(handles, vec![b, c]);

        for (_, value) in arena.iter_mut() {
            *value *= 10;
        }
        let mut values: Vec<u32> = arena.iter_mut().map(|(_, value)| *value).collect();
        values.sort();
        assert_eq!(values, vec![20, 30]);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        let x = arena.allocate(1);
        arena.allocate(2);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.get(&x), None);
        let y = arena.allocate(9);
        assert_eq!(arena[y], 9);
    }

    #[test]
    fn test_get_mut_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        assert_eq!(arena.get_mut(&x), None);
    }
}
