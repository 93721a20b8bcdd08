use crate::compare::NaturalOrder;
use crate::red_black_tree::node::Link;
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;
use std::ptr;

/// A read-only position in a `RedBlackTree`.
///
/// A cursor either points at an entry or at the end position, which sits one past the maximum
/// entry. Moving forward from the maximum reaches the end, moving backward from the end reaches
/// the maximum, and moving forward from the end wraps around to the minimum. Two cursors are equal
/// when they point at the same node of the same tree. Cursors into different trees never compare
/// equal, not even two end cursors, so `cursor == other_tree.end()` is always `false`.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(1, "a");
/// tree.insert(2, "b");
///
/// let mut cursor = tree.end();
/// cursor.move_prev();
/// assert_eq!(cursor.entry(), Some((&2, &"b")));
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&1));
/// assert!(cursor == tree.begin());
/// ```
pub struct Cursor<'a, K, V, C = NaturalOrder> {
    tree: &'a RedBlackTree<K, V, C>,
    current: Link,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    pub(crate) fn new(tree: &'a RedBlackTree<K, V, C>, current: Link) -> Self {
        Cursor { tree, current }
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the key at the cursor, or `None` at the end position.
    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(|(key, _)| key)
    }

    /// Returns the value at the cursor, or `None` at the end position.
    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns the key-value pair at the cursor, or `None` at the end position.
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.current.map(|handle| tree.entry(handle).as_pair())
    }

    /// Moves the cursor to the next entry in key order.
    pub fn move_next(&mut self) {
        self.current = self.tree.next_link(self.current);
    }

    /// Moves the cursor to the previous entry in key order.
    pub fn move_prev(&mut self) {
        self.current = self.tree.prev_link(self.current);
    }

    /// Returns the entry that `move_next` would move to without moving the cursor.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let mut next = *self;
        next.move_next();
        next.entry()
    }

    /// Returns the entry that `move_prev` would move to without moving the cursor.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let mut prev = *self;
        prev.move_prev();
        prev.entry()
    }
}

impl<'a, K, V, C> Clone for Cursor<'a, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V, C> Copy for Cursor<'a, K, V, C> {}

impl<'a, K, V, C> PartialEq for Cursor<'a, K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<'a, K, V, C> Eq for Cursor<'a, K, V, C> {}

impl<'a, K, V, C> fmt::Debug for Cursor<'a, K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.entry()).finish()
    }
}

/// A position in a `RedBlackTree` that can modify the value it points at or remove the entry.
///
/// Keys are only ever handed out by shared reference, so the order of the tree cannot be broken
/// through a cursor. Removing the entry at the cursor moves it to the following entry; cursors and
/// handles to any other entry are unaffected by the removal.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// for key in 0..5 {
///     tree.insert(key, key * 10);
/// }
///
/// let mut cursor = tree.find_mut(&2);
/// *cursor.value_mut().unwrap() += 1;
/// assert_eq!(cursor.remove_current(), Some((2, 21)));
/// assert_eq!(cursor.key(), Some(&3));
/// assert_eq!(tree.len(), 4);
/// ```
pub struct CursorMut<'a, K, V, C = NaturalOrder> {
    tree: &'a mut RedBlackTree<K, V, C>,
    current: Link,
}

impl<'a, K, V, C> CursorMut<'a, K, V, C> {
    pub(crate) fn new(tree: &'a mut RedBlackTree<K, V, C>, current: Link) -> Self {
        CursorMut { tree, current }
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the key at the cursor, or `None` at the end position.
    pub fn key(&self) -> Option<&K> {
        self.current.map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the value at the cursor, or `None` at the end position.
    pub fn value(&self) -> Option<&V> {
        self.current.map(|handle| &self.tree.entry(handle).value)
    }

    /// Returns a mutable reference to the value at the cursor, or `None` at the end position.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let handle = self.current?;
        Some(&mut self.tree.entry_mut(handle).value)
    }

    /// Returns the key and a mutable reference to the value at the cursor.
    pub fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        let handle = self.current?;
        Some(self.tree.entry_mut(handle).as_pair_mut())
    }

    /// Converts the cursor into a mutable reference to the value it points at, borrowed for as
    /// long as the tree was.
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let CursorMut { tree, current } = self;
        let handle = current?;
        Some(&mut tree.entry_mut(handle).value)
    }

    /// Moves the cursor to the next entry in key order.
    pub fn move_next(&mut self) {
        self.current = self.tree.next_link(self.current);
    }

    /// Moves the cursor to the previous entry in key order.
    pub fn move_prev(&mut self) {
        self.current = self.tree.prev_link(self.current);
    }

    /// Removes the entry at the cursor and moves the cursor to the next entry. Returns `None` and
    /// does nothing at the end position.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let handle = self.current?;
        self.current = self.tree.successor(handle);
        Some(self.tree.remove_at(handle).into_pair())
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(&*self.tree, self.current)
    }

    /// Converts the cursor into a read-only cursor at the same position.
    pub fn into_cursor(self) -> Cursor<'a, K, V, C> {
        Cursor::new(self.tree, self.current)
    }
}

impl<'a, K, V, C> fmt::Debug for CursorMut<'a, K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().entry()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::red_black_tree::RedBlackTree;

    fn tree() -> RedBlackTree<u32, u32> {
        let mut tree = RedBlackTree::new();
        for key in &[5, 3, 8, 1, 4, 7, 9] {
            tree.insert(*key, key * 10);
        }
        tree
    }

    #[test]
    fn test_walk_forward() {
        let tree = tree();
        let mut cursor = tree.begin();
        let mut keys = Vec::new();
        while let Some(key) = cursor.key() {
            keys.push(*key);
            cursor.move_next();
        }
        assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
        assert!(cursor == tree.end());
    }

    #[test]
    fn test_walk_backward_from_end() {
        let tree = tree();
        let mut cursor = tree.end();
        let mut keys = Vec::new();
        loop {
            cursor.move_prev();
            match cursor.key() {
                Some(key) => keys.push(*key),
                None => break,
            }
        }
        assert_eq!(keys, vec![9, 8, 7, 5, 4, 3, 1]);
    }

    #[test]
    fn test_end_wraps_to_begin() {
        let tree = tree();
        let mut cursor = tree.end();
        cursor.move_next();
        assert!(cursor == tree.begin());
    }

    #[test]
    fn test_predecessor_of_successor() {
        let tree = tree();
        let mut cursor = tree.begin();
        cursor.move_next();
        while cursor.peek_next().is_some() {
            let mut probe = cursor;
            probe.move_next();
            probe.move_prev();
            assert!(probe == cursor);
            cursor.move_next();
        }
    }

    #[test]
    fn test_peek() {
        let tree = tree();
        let cursor = tree.find(&5);
        assert_eq!(cursor.peek_prev(), Some((&4, &40)));
        assert_eq!(cursor.peek_next(), Some((&7, &70)));
        assert_eq!(cursor.key(), Some(&5));
    }

    #[test]
    fn test_cursors_of_different_trees_differ() {
        let first = tree();
        let second = tree();
        assert!(first.end() != second.end());
        assert!(first.find(&5) != second.find(&5));

        let empty: RedBlackTree<u32, u32> = RedBlackTree::new();
        let mut cursor = first.begin();
        while !cursor.is_end() {
            cursor.move_next();
        }
        assert!(cursor == first.end());
        assert!(cursor != empty.end());
    }

    #[test]
    fn test_empty_tree_cursor() {
        let tree: RedBlackTree<u32, u32> = RedBlackTree::new();
        let mut cursor = tree.end();
        cursor.move_prev();
        assert!(cursor.is_end());
        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_value_mut() {
        let mut tree = tree();
        {
            let mut cursor = tree.find_mut(&7);
            *cursor.value_mut().unwrap() = 0;
            cursor.move_prev();
            assert_eq!(cursor.entry_mut(), Some((&5, &mut 50)));
        }
        assert_eq!(tree.find(&7).value(), Some(&0));
    }

    #[test]
    fn test_remove_current_walk() {
        let mut tree = tree();
        {
            let mut cursor = tree.begin_mut();
            while let Some(key) = cursor.key().cloned() {
                if key % 2 == 1 {
                    assert_eq!(cursor.remove_current(), Some((key, key * 10)));
                } else {
                    cursor.move_next();
                }
            }
            assert_eq!(cursor.remove_current(), None);
        }
        assert!(tree.validate().is_ok());
        assert_eq!(
            tree.iter().map(|(key, _)| *key).collect::<Vec<u32>>(),
            vec![4, 8],
        );
    }

    #[test]
    fn test_find_missing_is_end() {
        let mut tree = tree();
        assert!(tree.find(&6).is_end());
        assert!(tree.find_mut(&6).is_end());
        assert_eq!(tree.find_mut(&6).value_mut(), None);
    }

    #[test]
    fn test_into_cursor() {
        let mut tree = tree();
        let (cursor, inserted) = tree.insert(6, 60);
        assert!(inserted);
        let mut cursor = cursor.into_cursor();
        cursor.move_next();
        assert_eq!(cursor.key(), Some(&7));
    }
}
