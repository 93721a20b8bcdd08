use crate::compare::NaturalOrder;
use crate::red_black_tree::node::Link;
use crate::red_black_tree::tree::RedBlackTree;
use std::iter::FusedIterator;
use std::vec;

/// An iterator over a contiguous run of entries of a `RedBlackTree`.
///
/// This iterator walks successor and predecessor links in place and yields immutable references.
pub struct Range<'a, K, V, C = NaturalOrder> {
    tree: &'a RedBlackTree<K, V, C>,
    front: Link,
    back: Link,
}

impl<'a, K, V, C> Range<'a, K, V, C> {
    // `front` and `back` are either both the sentinel or both nodes with `front <= back`.
    pub(crate) fn new(tree: &'a RedBlackTree<K, V, C>, front: Link, back: Link) -> Self {
        Range { tree, front, back }
    }

    fn finish(&mut self) {
        self.front = None;
        self.back = None;
    }
}

impl<'a, K, V, C> Clone for Range<'a, K, V, C> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, K, V, C> Iterator for Range<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.front?;
        if self.front == self.back {
            self.finish();
        } else {
            self.front = self.tree.successor(handle);
        }
        Some(self.tree.entry(handle).as_pair())
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Range<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.back?;
        if self.front == self.back {
            self.finish();
        } else {
            self.back = self.tree.predecessor(handle);
        }
        Some(self.tree.entry(handle).as_pair())
    }
}

impl<'a, K, V, C> FusedIterator for Range<'a, K, V, C> {}

/// An iterator for `RedBlackTree<K, V, C>`.
///
/// This iterator traverses the elements of the tree in-order and yields immutable references.
pub struct Iter<'a, K, V, C = NaturalOrder> {
    range: Range<'a, K, V, C>,
    remaining: usize,
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    pub(crate) fn new(range: Range<'a, K, V, C>, remaining: usize) -> Self {
        Iter { range, remaining }
    }
}

impl<'a, K, V, C> Clone for Iter<'a, K, V, C> {
    fn clone(&self) -> Self {
        Iter {
            range: self.range.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let ret = self.range.next();
        if ret.is_some() {
            self.remaining -= 1;
        }
        ret
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Iter<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let ret = self.range.next_back();
        if ret.is_some() {
            self.remaining -= 1;
        }
        ret
    }
}

impl<'a, K, V, C> ExactSizeIterator for Iter<'a, K, V, C> {}

impl<'a, K, V, C> FusedIterator for Iter<'a, K, V, C> {}

/// A mutable iterator for `RedBlackTree<K, V, C>`.
///
/// This iterator traverses the elements of the tree in-order and yields mutable references to
/// the values.
pub struct IterMut<'a, K, V> {
    inner: vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(pairs: Vec<(&'a K, &'a mut V)>) -> Self {
        IterMut {
            inner: pairs.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// An owning iterator for `RedBlackTree<K, V, C>`.
///
/// This iterator traverses the elements of the tree in-order and yields owned entries.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(pairs: Vec<(K, V)>) -> Self {
        IntoIter {
            inner: pairs.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
