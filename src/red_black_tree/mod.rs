//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Nodes are stored in a typed arena and link to their parent and children by handle. The
//! sentinel that terminates every leaf and sits above the root is the absent link, so each tree
//! carries its own sentinel without allocating it.

mod cursor;
mod iter;
mod map;
mod node;
mod set;
mod tree;

pub use self::cursor::{Cursor, CursorMut};
pub use self::iter::{IntoIter, Iter, IterMut, Range};
pub use self::map::RedBlackMap;
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter, RedBlackSetRange};
pub use self::tree::{RedBlackTree, DEFAULT_CHUNK_SIZE};
