use crate::arena::{Handle, TypedArena};
use crate::compare::{Comparator, NaturalOrder};
use crate::entry::Entry;
use crate::error::{Result, Violation};
use crate::red_black_tree::cursor::{Cursor, CursorMut};
use crate::red_black_tree::iter::{IntoIter, Iter, IterMut, Range};
use crate::red_black_tree::node::{Color, Link, Node};
use log::{debug, trace, warn};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::ops::{Bound, RangeBounds};

/// Number of nodes reserved at a time when no chunk size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

enum Search {
    Found(Handle),
    Vacant(Link, Side),
}

/// A red-black tree whose nodes live in a typed arena and refer to each other by handle.
///
/// The tree keeps every key unique under its comparator. The root is black, no red node has a red
/// child, and every path from a node to the sentinel crosses the same number of black nodes, so
/// the height stays within `2 * log2(len + 1)`.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// for key in &[5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(*key, ());
/// }
///
/// assert_eq!(tree.len(), 7);
/// assert_eq!(tree.lower_bound(&6).key(), Some(&7));
/// assert_eq!(tree.upper_bound(&7).key(), Some(&8));
/// assert!(tree.erase(&5));
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct RedBlackTree<K, V, C = NaturalOrder> {
    nodes: TypedArena<Node<K, V>>,
    root: Link,
    len: usize,
    comparator: C,
}

impl<K, V> RedBlackTree<K, V> {
    /// Constructs a new, empty `RedBlackTree<K, V>` ordered by `Ord`.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Constructs a new, empty `RedBlackTree<K, V>` that reserves `chunk_size` nodes at a time.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self::with_comparator_and_chunk_size(NaturalOrder, chunk_size)
    }
}

impl<K, V, C> RedBlackTree<K, V, C> {
    /// Constructs a new, empty tree ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_chunk_size(comparator, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty tree ordered by `comparator` that reserves `chunk_size` nodes at a
    /// time.
    pub fn with_comparator_and_chunk_size(comparator: C, chunk_size: usize) -> Self {
        RedBlackTree {
            nodes: TypedArena::new(chunk_size),
            root: None,
            len: 0,
            comparator,
        }
    }

    /// Returns the comparator that orders the keys of the tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry. The sentinel becomes the root again and the arena is released in bulk.
    pub fn clear(&mut self) {
        debug!("Clearing red black tree with {} nodes.", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[handle];
            for child in node.left.iter().chain(node.right.iter()) {
                stack.push((*child, depth + 1));
            }
        }
        height
    }

    /// Returns a cursor at the minimum entry, or at the end if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.first_link())
    }

    /// Returns a cursor at the end position, one past the maximum entry.
    pub fn end(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, None)
    }

    /// Returns a mutable cursor at the minimum entry, or at the end if the tree is empty.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, C> {
        let first = self.first_link();
        CursorMut::new(self, first)
    }

    /// Returns an iterator over the entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(self.full_range(), self.len)
    }

    /// Returns an iterator over the entries in key order that allows the values to be modified.
    ///
    /// The pairs are gathered when the iterator is created: memory is O(len), and the arena's
    /// reserved blocks are scanned once, so time is O(capacity) of the arena.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let ranks: HashMap<Handle, usize> = self
            .in_order()
            .into_iter()
            .enumerate()
            .map(|(rank, handle)| (handle, rank))
            .collect();

        let mut slots: Vec<Option<(&K, &mut V)>> = Vec::with_capacity(ranks.len());
        slots.resize_with(ranks.len(), || None);
        for (handle, node) in self.nodes.iter_mut() {
            if let Some(rank) = ranks.get(&handle) {
                slots[*rank] = Some(node.entry.as_pair_mut());
            }
        }
        IterMut::new(slots.into_iter().flatten().collect())
    }

    pub(crate) fn full_range(&self) -> Range<'_, K, V, C> {
        Range::new(self, self.first_link(), self.last_link())
    }

    pub(crate) fn entry(&self, handle: Handle) -> &Entry<K, V> {
        &self.nodes[handle].entry
    }

    pub(crate) fn entry_mut(&mut self, handle: Handle) -> &mut Entry<K, V> {
        &mut self.nodes[handle].entry
    }

    fn color(&self, link: Link) -> Color {
        match link {
            None => Color::Black,
            Some(handle) => self.nodes[handle].color,
        }
    }

    fn is_red(&self, link: Link) -> bool {
        self.color(link) == Color::Red
    }

    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(handle) = link {
            self.nodes[handle].color = color;
        }
    }

    fn set_parent(&mut self, link: Link, parent: Link) {
        if let Some(handle) = link {
            self.nodes[handle].parent = parent;
        }
    }

    fn child(&self, handle: Handle, side: Side) -> Link {
        match side {
            Side::Left => self.nodes[handle].left,
            Side::Right => self.nodes[handle].right,
        }
    }

    fn set_child(&mut self, handle: Handle, side: Side, child: Link) {
        match side {
            Side::Left => self.nodes[handle].left = child,
            Side::Right => self.nodes[handle].right = child,
        }
    }

    fn first_link(&self) -> Link {
        self.root.map(|root| self.minimum(root))
    }

    fn last_link(&self) -> Link {
        self.root.map(|root| self.maximum(root))
    }

    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes[handle].left {
            handle = left;
        }
        handle
    }

    /// Returns the rightmost node of the subtree rooted at `handle`.
    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes[handle].right {
            handle = right;
        }
        handle
    }

    /// Returns the next node in key order, or the sentinel after the maximum.
    pub(crate) fn successor(&self, handle: Handle) -> Link {
        if let Some(right) = self.nodes[handle].right {
            return Some(self.minimum(right));
        }
        let mut curr = handle;
        let mut parent = self.nodes[handle].parent;
        while let Some(ancestor) = parent {
            if self.nodes[ancestor].right != Some(curr) {
                break;
            }
            curr = ancestor;
            parent = self.nodes[ancestor].parent;
        }
        parent
    }

    /// Returns the previous node in key order, or the sentinel before the minimum.
    pub(crate) fn predecessor(&self, handle: Handle) -> Link {
        if let Some(left) = self.nodes[handle].left {
            return Some(self.maximum(left));
        }
        let mut curr = handle;
        let mut parent = self.nodes[handle].parent;
        while let Some(ancestor) = parent {
            if self.nodes[ancestor].left != Some(curr) {
                break;
            }
            curr = ancestor;
            parent = self.nodes[ancestor].parent;
        }
        parent
    }

    /// Moves forward from `link`, treating the sentinel as the position before the minimum.
    pub(crate) fn next_link(&self, link: Link) -> Link {
        match link {
            Some(handle) => self.successor(handle),
            None => self.first_link(),
        }
    }

    /// Moves backward from `link`, treating the sentinel as the position after the maximum.
    pub(crate) fn prev_link(&self, link: Link) -> Link {
        match link {
            Some(handle) => self.predecessor(handle),
            None => self.last_link(),
        }
    }

    fn in_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len);
        let mut curr = self.first_link();
        while let Some(handle) = curr {
            order.push(handle);
            curr = self.successor(handle);
        }
        order
    }

    // Points whichever link referred to `old` at `new` instead, including the root.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if self.nodes[parent].left == Some(old) {
                    self.nodes[parent].left = new;
                } else {
                    self.nodes[parent].right = new;
                }
            },
        }
    }

    fn rotate_left(&mut self, handle: Handle) {
        let pivot = self.nodes[handle]
            .right
            .expect("Expected right child node to be `Some`.");
        let transferred = self.nodes[pivot].left;
        self.nodes[handle].right = transferred;
        self.set_parent(transferred, Some(handle));

        let parent = self.nodes[handle].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, handle, Some(pivot));

        self.nodes[pivot].left = Some(handle);
        self.nodes[handle].parent = Some(pivot);
    }

    fn rotate_right(&mut self, handle: Handle) {
        let pivot = self.nodes[handle]
            .left
            .expect("Expected left child node to be `Some`.");
        let transferred = self.nodes[pivot].right;
        self.nodes[handle].left = transferred;
        self.set_parent(transferred, Some(handle));

        let parent = self.nodes[handle].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, handle, Some(pivot));

        self.nodes[pivot].right = Some(handle);
        self.nodes[handle].parent = Some(pivot);
    }

    fn transplant(&mut self, old: Handle, new: Link) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, new);
        self.set_parent(new, parent);
    }

    fn attach(&mut self, handle: Handle, parent: Link, side: Side) {
        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.set_child(parent, side, Some(handle)),
        }
        self.len += 1;
        self.insert_fixup(handle);
    }

    fn insert_fixup(&mut self, mut curr: Handle) {
        while let Some(parent) = self.nodes[curr].parent {
            if !self.nodes[parent].is_red() {
                break;
            }
            // a red parent is never the root
            let grandparent = self.nodes[parent]
                .parent
                .expect("Expected red node to have a parent.");

            if self.nodes[grandparent].left == Some(parent) {
                let uncle = self.nodes[grandparent].right;
                if self.is_red(uncle) {
                    trace!("Recoloring red uncle; continuing fixup at grandparent.");
                    self.nodes[parent].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[grandparent].color = Color::Red;
                    curr = grandparent;
                    continue;
                }

                let mut parent = parent;
                if self.nodes[parent].right == Some(curr) {
                    curr = parent;
                    self.rotate_left(curr);
                    parent = self.nodes[curr]
                        .parent
                        .expect("Expected rotated node to have a parent.");
                }
                self.nodes[parent].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                self.rotate_right(grandparent);
            } else {
                let uncle = self.nodes[grandparent].left;
                if self.is_red(uncle) {
                    trace!("Recoloring red uncle; continuing fixup at grandparent.");
                    self.nodes[parent].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[grandparent].color = Color::Red;
                    curr = grandparent;
                    continue;
                }

                let mut parent = parent;
                if self.nodes[parent].left == Some(curr) {
                    curr = parent;
                    self.rotate_right(curr);
                    parent = self.nodes[curr]
                        .parent
                        .expect("Expected rotated node to have a parent.");
                }
                self.nodes[parent].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                self.rotate_left(grandparent);
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Unlinks and frees the node at `handle`, returning its entry. Every other handle stays
    /// valid: a two-child node is replaced by relinking its successor, not by moving entries.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> Entry<K, V> {
        let mut removed_color = self.nodes[handle].color;
        let replacement;
        let replacement_parent;

        match (self.nodes[handle].left, self.nodes[handle].right) {
            (None, right) => {
                replacement = right;
                replacement_parent = self.nodes[handle].parent;
                self.transplant(handle, right);
            },
            (left, None) => {
                replacement = left;
                replacement_parent = self.nodes[handle].parent;
                self.transplant(handle, left);
            },
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                removed_color = self.nodes[successor].color;
                replacement = self.nodes[successor].right;

                if self.nodes[successor].parent == Some(handle) {
                    replacement_parent = Some(successor);
                } else {
                    replacement_parent = self.nodes[successor].parent;
                    self.transplant(successor, replacement);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                }

                self.transplant(handle, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = self.nodes[handle].color;
            },
        }

        let node = self.nodes.free(&handle);
        self.len -= 1;

        if removed_color == Color::Black {
            self.delete_fixup(replacement, replacement_parent);
        }
        node.entry
    }

    // `curr` carries an extra black. Since the sentinel has no storage, its parent is tracked
    // alongside it.
    fn delete_fixup(&mut self, mut curr: Link, mut parent: Link) {
        while curr != self.root && !self.is_red(curr) {
            let parent_handle = match parent {
                Some(parent_handle) => parent_handle,
                None => break,
            };

            if self.nodes[parent_handle].left == curr {
                let mut sibling = self.nodes[parent_handle]
                    .right
                    .expect("Expected sibling of doubly black node to be `Some`.");
                if self.nodes[sibling].is_red() {
                    self.nodes[sibling].color = Color::Black;
                    self.nodes[parent_handle].color = Color::Red;
                    self.rotate_left(parent_handle);
                    sibling = self.nodes[parent_handle]
                        .right
                        .expect("Expected sibling of doubly black node to be `Some`.");
                }

                if !self.is_red(self.nodes[sibling].left) && !self.is_red(self.nodes[sibling].right) {
                    trace!("Pushing extra black up from sibling with black children.");
                    self.nodes[sibling].color = Color::Red;
                    curr = Some(parent_handle);
                    parent = self.nodes[parent_handle].parent;
                } else {
                    if !self.is_red(self.nodes[sibling].right) {
                        let near = self.nodes[sibling].left;
                        self.set_color(near, Color::Black);
                        self.nodes[sibling].color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.nodes[parent_handle]
                            .right
                            .expect("Expected sibling of doubly black node to be `Some`.");
                    }
                    self.nodes[sibling].color = self.nodes[parent_handle].color;
                    self.nodes[parent_handle].color = Color::Black;
                    let far = self.nodes[sibling].right;
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent_handle);
                    curr = self.root;
                    parent = None;
                }
            } else {
                let mut sibling = self.nodes[parent_handle]
                    .left
                    .expect("Expected sibling of doubly black node to be `Some`.");
                if self.nodes[sibling].is_red() {
                    self.nodes[sibling].color = Color::Black;
                    self.nodes[parent_handle].color = Color::Red;
                    self.rotate_right(parent_handle);
                    sibling = self.nodes[parent_handle]
                        .left
                        .expect("Expected sibling of doubly black node to be `Some`.");
                }

                if !self.is_red(self.nodes[sibling].left) && !self.is_red(self.nodes[sibling].right) {
                    trace!("Pushing extra black up from sibling with black children.");
                    self.nodes[sibling].color = Color::Red;
                    curr = Some(parent_handle);
                    parent = self.nodes[parent_handle].parent;
                } else {
                    if !self.is_red(self.nodes[sibling].left) {
                        let near = self.nodes[sibling].right;
                        self.set_color(near, Color::Black);
                        self.nodes[sibling].color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.nodes[parent_handle]
                            .left
                            .expect("Expected sibling of doubly black node to be `Some`.");
                    }
                    self.nodes[sibling].color = self.nodes[parent_handle].color;
                    self.nodes[parent_handle].color = Color::Black;
                    let far = self.nodes[sibling].left;
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent_handle);
                    curr = self.root;
                    parent = None;
                }
            }
        }

        self.set_color(curr, Color::Black);
    }

    /// Checks every red-black invariant along with the parent links and the stored length.
    ///
    /// This walks the whole tree and is meant for tests; the tree never violates an invariant
    /// through its public interface.
    pub fn validate(&self) -> Result<()>
    where
        C: Comparator<K>,
    {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(Violation::ParentLink.into());
            }
            if self.nodes[root].is_red() {
                return Err(Violation::RedRoot.into());
            }
        }

        let (_, count) = self.validate_subtree(self.root)?;
        if count != self.len || count != self.nodes.len() {
            return Err(Violation::Length.into());
        }

        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev_key) = prev {
                if !self.comparator.less(prev_key, key) {
                    return Err(Violation::Order.into());
                }
            }
            prev = Some(key);
        }
        Ok(())
    }

    // Returns the black height and node count of the subtree.
    fn validate_subtree(&self, link: Link) -> Result<(usize, usize)> {
        let handle = match link {
            None => return Ok((1, 0)),
            Some(handle) => handle,
        };
        let node = &self.nodes[handle];
        for child in node.left.iter().chain(node.right.iter()) {
            if self.nodes[*child].parent != Some(handle) {
                return Err(Violation::ParentLink.into());
            }
            if node.is_red() && self.nodes[*child].is_red() {
                return Err(Violation::RedRed.into());
            }
        }

        let (left_height, left_count) = self.validate_subtree(node.left)?;
        let (right_height, right_count) = self.validate_subtree(node.right)?;
        if left_height != right_height {
            return Err(Violation::BlackHeight.into());
        }
        let own = if node.is_red() { 0 } else { 1 };
        Ok((left_height + own, left_count + right_count + 1))
    }
}

impl<K, V, C> RedBlackTree<K, V, C>
where
    C: Comparator<K>,
{
    fn search(&self, key: &K) -> Search {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(handle) = curr {
            parent = curr;
            let node_key = &self.nodes[handle].entry.key;
            if self.comparator.less(key, node_key) {
                side = Side::Left;
            } else if self.comparator.less(node_key, key) {
                side = Side::Right;
            } else {
                return Search::Found(handle);
            }
            curr = self.child(handle, side);
        }
        Search::Vacant(parent, side)
    }

    /// Inserts an entry unless an equivalent key is already present, building the value only
    /// when a node is created. Returns the node holding the key and whether it was inserted.
    pub(crate) fn insert_with<F>(&mut self, key: K, value: F) -> (Handle, bool)
    where
        F: FnOnce() -> V,
    {
        match self.search(&key) {
            Search::Found(handle) => (handle, false),
            Search::Vacant(parent, side) => {
                let handle = self.nodes.allocate(Node::new(key, value(), parent));
                self.attach(handle, parent, side);
                (handle, true)
            },
        }
    }

    pub(crate) fn try_insert_with<F>(&mut self, key: K, value: F) -> Result<(Handle, bool)>
    where
        F: FnOnce() -> V,
    {
        match self.search(&key) {
            Search::Found(handle) => Ok((handle, false)),
            Search::Vacant(parent, side) => {
                let handle = match self.nodes.try_allocate(Node::new(key, value(), parent)) {
                    Ok(handle) => handle,
                    Err(err) => {
                        warn!("Failed to allocate red black tree node: {}", err);
                        return Err(err.into());
                    },
                };
                self.attach(handle, parent, side);
                Ok((handle, true))
            },
        }
    }

    /// Inserts a key-value pair. If an equivalent key already exists, the tree is left untouched
    /// and the pair is dropped. Returns a cursor at the entry for the key and whether an
    /// insertion happened.
    pub fn insert(&mut self, key: K, value: V) -> (CursorMut<'_, K, V, C>, bool) {
        let (handle, inserted) = self.insert_with(key, || value);
        (CursorMut::new(self, Some(handle)), inserted)
    }

    /// Same as `insert`, but reports a failure to allocate the node instead of aborting. The tree
    /// is unchanged when an error is returned.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(CursorMut<'_, K, V, C>, bool)> {
        let (handle, inserted) = self.try_insert_with(key, || value)?;
        Ok((CursorMut::new(self, Some(handle)), inserted))
    }
}

impl<K, V, C> RedBlackTree<K, V, C> {
    pub(crate) fn find_link<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            let node_key = node.entry.key.borrow();
            if self.comparator.less(key, node_key) {
                curr = node.left;
            } else if self.comparator.less(node_key, key) {
                curr = node.right;
            } else {
                return Some(handle);
            }
        }
        None
    }

    // First node whose key is not ordered before `key`.
    pub(crate) fn lower_bound_link<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut bound = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            if self.comparator.less(node.entry.key.borrow(), key) {
                curr = node.right;
            } else {
                bound = curr;
                curr = node.left;
            }
        }
        bound
    }

    // First node whose key is ordered after `key`.
    pub(crate) fn upper_bound_link<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut bound = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            if self.comparator.less(key, node.entry.key.borrow()) {
                bound = curr;
                curr = node.left;
            } else {
                curr = node.right;
            }
        }
        bound
    }

    // Last node whose key is not ordered after `key`.
    pub(crate) fn floor_link<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut bound = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            if self.comparator.less(key, node.entry.key.borrow()) {
                curr = node.left;
            } else {
                bound = curr;
                curr = node.right;
            }
        }
        bound
    }

    // Last node whose key is ordered before `key`.
    fn strict_floor_link<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let mut bound = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            if self.comparator.less(node.entry.key.borrow(), key) {
                bound = curr;
                curr = node.right;
            } else {
                curr = node.left;
            }
        }
        bound
    }

    /// Returns a cursor at the entry with a key equivalent to `key`, or at the end if there is
    /// none.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        Cursor::new(self, self.find_link(key))
    }

    /// Returns a mutable cursor at the entry with a key equivalent to `key`, or at the end if
    /// there is none.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let link = self.find_link(key);
        CursorMut::new(self, link)
    }

    /// Returns a cursor at the first entry whose key is not ordered before `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        Cursor::new(self, self.lower_bound_link(key))
    }

    /// Returns a cursor at the first entry whose key is ordered after `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        Cursor::new(self, self.upper_bound_link(key))
    }

    /// Removes the entry with a key equivalent to `key` and returns it as a pair.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find_link(key)
            .map(|handle| self.remove_at(handle).into_pair())
    }

    /// Removes the entry with a key equivalent to `key`. Returns `false` if there was no such
    /// entry, in which case the tree is untouched.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Returns an iterator over the entries whose keys lie within `range`.
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        let front = match range.start_bound() {
            Bound::Included(key) => self.lower_bound_link(key),
            Bound::Excluded(key) => self.upper_bound_link(key),
            Bound::Unbounded => self.first_link(),
        };
        let back = match range.end_bound() {
            Bound::Included(key) => self.floor_link(key),
            Bound::Excluded(key) => self.strict_floor_link(key),
            Bound::Unbounded => self.last_link(),
        };

        match (front, back) {
            (Some(front_handle), Some(back_handle)) => {
                let front_key = self.nodes[front_handle].entry.key.borrow();
                let back_key = self.nodes[back_handle].entry.key.borrow();
                if self.comparator.less(back_key, front_key) {
                    Range::new(self, None, None)
                } else {
                    Range::new(self, front, back)
                }
            },
            _ => Range::new(self, None, None),
        }
    }
}

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> IntoIterator for RedBlackTree<K, V, C> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(mut self) -> Self::IntoIter {
        debug!("Draining red black tree with {} nodes.", self.len);
        let order = self.in_order();
        let pairs = order
            .iter()
            .map(|handle| self.nodes.free(handle).entry.into_pair())
            .collect();
        IntoIter::new(pairs)
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackTree<K, V, C> {
    type IntoIter = Iter<'a, K, V, C>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut RedBlackTree<K, V, C> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
