//! Strict weak orderings used to arrange keys.
//!
//! A comparator only has to answer "is `lhs` ordered before `rhs`". Two keys are considered
//! equivalent when neither is ordered before the other, so key types without `Eq` can be used
//! as long as a comparator exists for them.

use std::cmp::Ordering;

/// A strict weak ordering over `T`.
///
/// Any closure of the form `Fn(&T, &T) -> bool` is a comparator.
///
/// # Examples
///
/// ```
/// use rbtree_collections::compare::{Comparator, NaturalOrder, ReverseOrder};
///
/// assert!(NaturalOrder.less(&1, &2));
/// assert!(ReverseOrder.less(&2, &1));
///
/// let by_len = |lhs: &&str, rhs: &&str| lhs.len() < rhs.len();
/// assert!(by_len.equivalent(&"ab", &"cd"));
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns `true` if `lhs` is ordered strictly before `rhs`.
    fn less(&self, lhs: &T, rhs: &T) -> bool;

    /// Returns `true` if neither key is ordered before the other.
    fn equivalent(&self, lhs: &T, rhs: &T) -> bool {
        !self.less(lhs, rhs) && !self.less(rhs, lhs)
    }

    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        if self.less(lhs, rhs) {
            Ordering::Less
        } else if self.less(rhs, lhs) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord + ?Sized,
{
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

/// Orders keys by the reverse of their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReverseOrder;

impl<T> Comparator<T> for ReverseOrder
where
    T: Ord + ?Sized,
{
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        rhs < lhs
    }
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        self(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::{Comparator, NaturalOrder, ReverseOrder};
    use std::cmp::Ordering;

    #[test]
    fn test_natural_order() {
        assert!(NaturalOrder.less(&1, &2));
        assert!(!NaturalOrder.less(&2, &2));
        assert_eq!(NaturalOrder.compare(&3, &2), Ordering::Greater);
        assert!(NaturalOrder.equivalent("a", "a"));
    }

    #[test]
    fn test_reverse_order() {
        assert!(ReverseOrder.less(&2, &1));
        assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
    }

    #[test]
    fn test_closure_comparator() {
        let case_insensitive =
            |lhs: &String, rhs: &String| lhs.to_lowercase() < rhs.to_lowercase();
        assert!(case_insensitive.equivalent(&String::from("Key"), &String::from("kEY")));
        assert_eq!(
            case_insensitive.compare(&String::from("a"), &String::from("B")),
            Ordering::Less,
        );
    }
}
