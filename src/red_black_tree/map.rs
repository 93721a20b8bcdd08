use crate::compare::{Comparator, NaturalOrder};
use crate::error::{Error, Result};
use crate::red_black_tree::cursor::{Cursor, CursorMut};
use crate::red_black_tree::iter::{IntoIter, Iter, IterMut, Range};
use crate::red_black_tree::tree::RedBlackTree;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut, RangeBounds};

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// The root is black, a red node never has a red child, and every path from a node down to a leaf
/// passes through the same number of black nodes, so the tree is never more than twice as deep as
/// a perfectly balanced one.
///
/// Keys are unique under the map's comparator. `insert` never replaces an existing entry; use
/// `upsert` or `get_or_insert_default` to update or create.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.first(), Some((&0, &1)));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackMap<K, V, C = NaturalOrder> {
    tree: RedBlackTree<K, V, C>,
}

impl<K, V> RedBlackMap<K, V> {
    /// Constructs a new, empty `RedBlackMap<K, V>` ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap {
            tree: RedBlackTree::new(),
        }
    }

    /// Constructs a new, empty `RedBlackMap<K, V>` that reserves room for `chunk_size` entries
    /// at a time.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackMap {
            tree: RedBlackTree::with_chunk_size(chunk_size),
        }
    }
}

impl<K, V, C> RedBlackMap<K, V, C> {
    /// Constructs a new, empty map ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_comparator(|lhs: &u32, rhs: &u32| lhs > rhs);
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        RedBlackMap {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    /// Constructs a new, empty map ordered by `comparator` that reserves room for `chunk_size`
    /// entries at a time.
    pub fn with_comparator_and_chunk_size(comparator: C, chunk_size: usize) -> Self {
        RedBlackMap {
            tree: RedBlackTree::with_comparator_and_chunk_size(comparator, chunk_size),
        }
    }

    /// Returns the comparator that orders the keys of the map.
    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the entry with the minimum key, or `None` if the map is empty.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.begin().entry()
    }

    /// Returns the entry with the maximum key, or `None` if the map is empty.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut cursor = self.tree.end();
        cursor.move_prev();
        cursor.entry()
    }

    /// Returns a cursor at the entry with the minimum key.
    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        self.tree.begin()
    }

    /// Returns a cursor at the end position, one past the entry with the maximum key.
    pub fn end(&self) -> Cursor<'_, K, V, C> {
        self.tree.end()
    }

    /// Returns a mutable cursor at the entry with the minimum key.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, C> {
        self.tree.begin_mut()
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 2);
    /// map.insert(1, 1);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next_back(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (_, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.tree.iter_mut()
    }

    /// Returns an iterator over the keys of the map in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the map in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Returns a mutable iterator over the values of the map in key order.
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.iter_mut().map(|(_, value)| value)
    }

    /// Checks the red black invariants of the underlying tree.
    pub fn validate(&self) -> Result<()>
    where
        C: Comparator<K>,
    {
        self.tree.validate()
    }
}

impl<K, V, C> RedBlackMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Inserts a key-value pair into the map. If the key already exists in the map, the map is
    /// left unchanged and the pair is dropped. Returns a cursor at the entry for the key and
    /// whether the pair was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert!(map.insert(1, 1).1);
    ///
    /// let (cursor, inserted) = map.insert(1, 2);
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (CursorMut<'_, K, V, C>, bool) {
        self.tree.insert(key, value)
    }

    /// Same as `insert`, but returns `Error::AllocationFailure` instead of aborting if the new
    /// entry cannot be allocated. The map is unchanged on failure.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(CursorMut<'_, K, V, C>, bool)> {
        self.tree.try_insert(key, value)
    }

    /// Inserts a key-value pair, replacing the value of an existing entry. Returns the previous
    /// value if there was one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.upsert(1, 1), None);
    /// assert_eq!(map.upsert(1, 2), Some(1));
    /// assert_eq!(map[&1], 2);
    /// ```
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.find_link(&key) {
            Some(handle) => Some(mem::replace(&mut self.tree.entry_mut(handle).value, value)),
            None => {
                self.tree.insert_with(key, || value);
                None
            },
        }
    }

    /// Returns a mutable reference to the value for `key`, first inserting the value returned by
    /// `default` if the key is missing.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (handle, _) = self.tree.insert_with(key, default);
        &mut self.tree.entry_mut(handle).value
    }

    /// Returns a mutable reference to the value for `key`, first inserting `V::default()` if the
    /// key is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut counts = RedBlackMap::new();
    /// for word in "a b a c a".split(' ') {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts.get("a"), Some(&3));
    /// assert_eq!(counts.len(), 3);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }
}

impl<K, V, C> RedBlackMap<K, V, C> {
    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.remove(key)
    }

    /// Removes the entry for `key`. Returns `false` if the key was not in the map.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.erase(key)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.find_link(key).is_some()
    }

    /// Returns the number of entries with a key equivalent to `key`, which is either 0 or 1.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        if self.contains_key(key) {
            1
        } else {
            0
        }
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree
            .find_link(key)
            .map(|handle| &self.tree.entry(handle).value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let handle = self.tree.find_link(key)?;
        Some(&mut self.tree.entry_mut(handle).value)
    }

    /// Returns the value associated with `key`, or `Error::KeyNotFound`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    /// use rbtree_collections::Error;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(*map.at(&1).unwrap(), 1);
    /// assert!(match map.at(&2) {
    ///     Err(Error::KeyNotFound) => true,
    ///     _ => false,
    /// });
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with `key`, or `Error::KeyNotFound`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a cursor at the entry for `key`, or at the end position if there is none.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.find(key)
    }

    /// Returns a mutable cursor at the entry for `key`, or at the end position if there is none.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.find_mut(key)
    }

    /// Returns a cursor at the first entry whose key is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, ()> = [1, 3, 5].iter().map(|key| (*key, ())).collect();
    /// assert_eq!(map.lower_bound(&3).key(), Some(&3));
    /// assert_eq!(map.lower_bound(&4).key(), Some(&5));
    /// assert!(map.lower_bound(&6).is_end());
    /// ```
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.lower_bound(key)
    }

    /// Returns a cursor at the first entry whose key is greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.upper_bound(key)
    }

    /// Returns the pair `(lower_bound(key), upper_bound(key))`, which spans at most one entry.
    pub fn equal_range<Q>(&self, key: &Q) -> (Cursor<'_, K, V, C>, Cursor<'_, K, V, C>)
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        (self.tree.lower_bound(key), self.tree.upper_bound(key))
    }

    /// Returns an iterator over the entries whose keys lie in `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = (0..10).map(|key| (key, key * key)).collect();
    /// assert_eq!(
    ///     map.range(3..6).map(|(_, value)| *value).collect::<Vec<u32>>(),
    ///     vec![9, 16, 25],
    /// );
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V, C>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        self.tree.range(range)
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree
            .floor_link(key)
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    pub fn ceil<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.lower_bound(key).key()
    }
}

impl<K, V, C> IntoIterator for RedBlackMap<K, V, C> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackMap<K, V, C> {
    type IntoIter = Iter<'a, K, V, C>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut RedBlackMap<K, V, C> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, C> Default for RedBlackMap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Extend<(K, V)> for RedBlackMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Inserts every pair in order. A pair whose key is already present is dropped, so the first
    /// occurrence of a key wins.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.tree.insert_with(key, || value);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for RedBlackMap<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C> PartialEq for RedBlackMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for RedBlackMap<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C> PartialOrd for RedBlackMap<K, V, C>
where
    K: PartialOrd,
    V: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, V, C> Ord for RedBlackMap<K, V, C>
where
    K: Ord,
    V: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K, V, C> fmt::Debug for RedBlackMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C, Q> Index<&'a Q> for RedBlackMap<K, V, C>
where
    K: Borrow<Q>,
    C: Comparator<Q>,
    Q: ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, C, Q> IndexMut<&'a Q> for RedBlackMap<K, V, C>
where
    K: Borrow<Q>,
    C: Comparator<Q>,
    Q: ?Sized,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<K, V, C> Serialize for RedBlackMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de, K, V, C> Deserialize<'de> for RedBlackMap<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RedBlackMapVisitor {
            marker: PhantomData,
        })
    }
}

struct RedBlackMapVisitor<K, V, C> {
    marker: PhantomData<fn() -> RedBlackMap<K, V, C>>,
}

impl<'de, K, V, C> Visitor<'de> for RedBlackMapVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = RedBlackMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = RedBlackMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.tree.insert_with(key, || value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMap;
    use crate::compare::ReverseOrder;
    use crate::error::Error;

    #[test]
    fn test_len_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_first_last_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = RedBlackMap::new();
        assert!(map.insert(1, 1).1);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_existing() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert!(!map.insert(1, 3).1);
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_cursor_mutates_value() {
        let mut map = RedBlackMap::new();
        {
            let (mut cursor, _) = map.insert(1, 1);
            *cursor.value_mut().unwrap() = 5;
        }
        assert_eq!(map[&1], 5);
    }

    #[test]
    fn test_upsert() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.upsert(1, 1), None);
        assert_eq!(map.upsert(1, 3), Some(1));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_or_insert_default() {
        let mut map: RedBlackMap<u32, Vec<u32>> = RedBlackMap::new();
        map.get_or_insert_default(1).push(1);
        map.get_or_insert_default(1).push(2);
        assert_eq!(map[&1], vec![1, 2]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_erase() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert!(map.erase(&1));
        assert!(!map.erase(&1));
        assert!(map.is_empty());
    }

    #[test]
    fn test_at() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        *map.at_mut(&1).unwrap() += 1;
        assert_eq!(*map.at(&1).unwrap(), 2);
        match map.at_mut(&3) {
            Err(Error::KeyNotFound) => {},
            _ => panic!("Expected `KeyNotFound`."),
        }
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_count() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.count(&1), 1);
        assert_eq!(map.count(&2), 0);
    }

    #[test]
    fn test_first_last() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.first(), Some((&1, &1)));
        assert_eq!(map.last(), Some((&5, &5)));
    }

    #[test]
    fn test_get_mut() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_equal_range() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);

        let (lower, upper) = map.equal_range(&1);
        assert_eq!(lower.key(), Some(&1));
        assert_eq!(upper.key(), Some(&3));

        let (lower, upper) = map.equal_range(&2);
        assert!(lower == upper);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut map = RedBlackMap::new();
        map.insert(String::from("b"), 2);
        map.insert(String::from("a"), 1);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map["b"], 2);
        assert_eq!(map.lower_bound("aa").key().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_custom_comparator() {
        let mut map = RedBlackMap::with_comparator(ReverseOrder);
        map.insert(1, 'a');
        map.insert(3, 'c');
        map.insert(2, 'b');
        assert_eq!(map.values().collect::<String>(), "cba");
        assert_eq!(map.first(), Some((&3, &'c')));
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_into_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
        assert_eq!(
            map.iter().rev().collect::<Vec<(&u32, &u32)>>(),
            vec![(&5, &6), (&3, &4), (&1, &2)],
        );
    }

    #[test]
    fn test_iter_mut() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        for value in map.values_mut() {
            *value += 1;
        }

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &3), (&3, &5), (&5, &7)],
        );
    }

    #[test]
    fn test_from_iter_keeps_first() {
        let map: RedBlackMap<u32, char> = vec![(2, 'a'), (1, 'b'), (2, 'c')].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&2], 'a');
    }

    #[test]
    fn test_eq_and_ord() {
        let first: RedBlackMap<u32, u32> = (0..3).map(|key| (key, key)).collect();
        let mut second: RedBlackMap<u32, u32> = (0..3).rev().map(|key| (key, key)).collect();
        assert_eq!(first, second);

        second.upsert(2, 3);
        assert!(first < second);
        second.erase(&2);
        assert!(first > second);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map: RedBlackMap<u32, u32> = (0..8).map(|key| (key, key)).collect();
        let copy = map.clone();
        map.erase(&3);
        assert_eq!(copy.len(), 8);
        assert!(copy.contains_key(&3));
        assert!(copy.validate().is_ok());
    }

    #[test]
    fn test_debug() {
        let map: RedBlackMap<u32, u32> = vec![(2, 20), (1, 10)].into_iter().collect();
        assert_eq!(format!("{:?}", map), "{1: 10, 2: 20}");
    }

    #[test]
    #[should_panic]
    fn test_index_missing() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        let _value = map[&0];
    }
}
