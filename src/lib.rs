//! Ordered map and set containers built on a red-black tree.
//!
//! The tree stores its nodes in a [`TypedArena`](arena::TypedArena) and orders keys with an
//! injected [`Comparator`](compare::Comparator). [`RedBlackMap`](red_black_tree::RedBlackMap) and
//! [`RedBlackSet`](red_black_tree::RedBlackSet) wrap the tree with the usual ordered-container
//! interface, including bidirectional cursors and O(log n) bound queries.

mod entry;
pub mod arena;
pub mod compare;
pub mod error;
pub mod red_black_tree;

pub use crate::error::{Error, Result, Violation};
