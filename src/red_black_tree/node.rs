use crate::arena::Handle;
use crate::entry::Entry;

/// A link to another node. `None` is the sentinel: it is black, it is the parent of the root, and
/// it is the child of every leaf.
pub type Link = Option<Handle>;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub entry: Entry<K, V>,
    pub color: Color,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<K, V> Node<K, V> {
    /// Creates a red node with no children attached beneath `parent`.
    pub fn new(key: K, value: V, parent: Link) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}
