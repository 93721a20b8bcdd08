use crate::compare::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::red_black_tree::cursor::Cursor;
use crate::red_black_tree::iter::{IntoIter, Iter, Range};
use crate::red_black_tree::map::RedBlackMap;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ops::RangeBounds;

/// An ordered set implemented using a red black tree.
///
/// Every operation of the set delegates to a `RedBlackMap` whose values are `()`, so the set
/// shares the map's ordering, cursor and complexity guarantees.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.first(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackSet<T, C = NaturalOrder> {
    map: RedBlackMap<T, (), C>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>` ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet {
            map: RedBlackMap::new(),
        }
    }

    /// Constructs a new, empty `RedBlackSet<T>` that reserves room for `chunk_size` keys at a
    /// time.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            map: RedBlackMap::with_chunk_size(chunk_size),
        }
    }
}

impl<T, C> RedBlackSet<T, C> {
    /// Constructs a new, empty set ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::compare::ReverseOrder;
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::with_comparator(ReverseOrder);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        RedBlackSet {
            map: RedBlackMap::with_comparator(comparator),
        }
    }

    /// Constructs a new, empty set ordered by `comparator` that reserves room for `chunk_size`
    /// keys at a time.
    pub fn with_comparator_and_chunk_size(comparator: C, chunk_size: usize) -> Self {
        RedBlackSet {
            map: RedBlackMap::with_comparator_and_chunk_size(comparator, chunk_size),
        }
    }

    /// Returns the comparator that orders the keys of the set.
    pub fn comparator(&self) -> &C {
        self.map.comparator()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn first(&self) -> Option<&T> {
        self.map.first().map(|(key, _)| key)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn last(&self) -> Option<&T> {
        self.map.last().map(|(key, _)| key)
    }

    /// Returns a cursor at the minimum key.
    pub fn begin(&self) -> Cursor<'_, T, (), C> {
        self.map.begin()
    }

    /// Returns a cursor at the end position, one past the maximum key.
    pub fn end(&self) -> Cursor<'_, T, (), C> {
        self.map.end()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T, C> {
        RedBlackSetIter {
            map_iter: self.map.iter(),
        }
    }

    /// Checks the red black invariants of the underlying tree.
    pub fn validate(&self) -> Result<()>
    where
        C: Comparator<T>,
    {
        self.map.validate()
    }
}

impl<T, C> RedBlackSet<T, C>
where
    C: Comparator<T>,
{
    /// Inserts a key into the set. Returns `false` and drops `key` if an equivalent key is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        self.map.insert(key, ()).1
    }

    /// Same as `insert`, but returns `Error::AllocationFailure` instead of aborting if the key
    /// cannot be allocated. The set is unchanged on failure.
    pub fn try_insert(&mut self, key: T) -> Result<bool> {
        Ok(self.map.try_insert(key, ())?.1)
    }
}

impl<T, C> RedBlackSet<T, C> {
    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Removes `key` from the set. Returns `false` if the key was not in the set.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.erase(key)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the number of keys equivalent to `key`, which is either 0 or 1.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.count(key)
    }

    /// Returns the stored key equivalent to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.find(key).key()
    }

    /// Returns a cursor at the key equivalent to `key`, or at the end position if there is none.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, T, (), C>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.find(key)
    }

    /// Returns a cursor at the first key that is not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, T, (), C>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.lower_bound(key)
    }

    /// Returns a cursor at the first key that is greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, T, (), C>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.upper_bound(key)
    }

    /// Returns the pair `(lower_bound(key), upper_bound(key))`.
    pub fn equal_range<Q>(&self, key: &Q) -> (Cursor<'_, T, (), C>, Cursor<'_, T, (), C>)
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.equal_range(key)
    }

    /// Returns an iterator over the keys that lie in `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..10).collect();
    /// assert_eq!(set.range(7..).collect::<Vec<&u32>>(), vec![&7, &8, &9]);
    /// assert_eq!(set.range(..=1).rev().collect::<Vec<&u32>>(), vec![&1, &0]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> RedBlackSetRange<'_, T, C>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        RedBlackSetRange {
            map_range: self.map.range(range),
        }
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.floor(key)
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.map.ceil(key)
    }
}

impl<T, C> IntoIterator for RedBlackSet<T, C> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackSet<T, C>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T, C>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct RedBlackSetIntoIter<T> {
    map_iter: IntoIter<T, ()>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for RedBlackSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map_iter.next_back().map(|pair| pair.0)
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoIter<T> {}

impl<T> FusedIterator for RedBlackSetIntoIter<T> {}

/// An iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T, C = NaturalOrder> {
    map_iter: Iter<'a, T, (), C>,
}

impl<'a, T, C> Clone for RedBlackSetIter<'a, T, C> {
    fn clone(&self) -> Self {
        RedBlackSetIter {
            map_iter: self.map_iter.clone(),
        }
    }
}

impl<'a, T, C> Iterator for RedBlackSetIter<'a, T, C>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_iter.size_hint()
    }
}

impl<'a, T, C> DoubleEndedIterator for RedBlackSetIter<'a, T, C>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map_iter.next_back().map(|pair| pair.0)
    }
}

impl<'a, T, C> ExactSizeIterator for RedBlackSetIter<'a, T, C> where T: 'a {}

impl<'a, T, C> FusedIterator for RedBlackSetIter<'a, T, C> where T: 'a {}

/// An iterator over a contiguous run of keys in `RedBlackSet<T, C>`.
pub struct RedBlackSetRange<'a, T, C = NaturalOrder> {
    map_range: Range<'a, T, (), C>,
}

impl<'a, T, C> Iterator for RedBlackSetRange<'a, T, C>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_range.next().map(|pair| pair.0)
    }
}

impl<'a, T, C> DoubleEndedIterator for RedBlackSetRange<'a, T, C>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map_range.next_back().map(|pair| pair.0)
    }
}

impl<'a, T, C> FusedIterator for RedBlackSetRange<'a, T, C> where T: 'a {}

impl<T, C> Default for RedBlackSet<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Extend<T> for RedBlackSet<T, C>
where
    C: Comparator<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.map.extend(iter.into_iter().map(|key| (key, ())));
    }
}

impl<T, C> FromIterator<T> for RedBlackSet<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C> PartialEq for RedBlackSet<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, C> Eq for RedBlackSet<T, C> where T: Eq {}

impl<T, C> PartialOrd for RedBlackSet<T, C>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.map.partial_cmp(&other.map)
    }
}

impl<T, C> Ord for RedBlackSet<T, C>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.map.cmp(&other.map)
    }
}

impl<T, C> fmt::Debug for RedBlackSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> Serialize for RedBlackSet<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T, C> Deserialize<'de> for RedBlackSet<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackSetVisitor {
            marker: PhantomData,
        })
    }
}

struct RedBlackSetVisitor<T, C> {
    marker: PhantomData<fn() -> RedBlackSet<T, C>>,
}

impl<'de, T, C> Visitor<'de> for RedBlackSetVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = RedBlackSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::default();
        while let Some(key) = seq.next_element()? {
            set.insert(key);
        }
        Ok(set)
    }
}
