use std::fmt;

use crate::index::{IndexType, NodeIndex};
use crate::tree::RedBlackTree;

/// Node of the red-black tree
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<K, Ix> {
    /// Left children
    pub left: Option<NodeIndex<Ix>>,
    /// Right children
    pub right: Option<NodeIndex<Ix>>,
    /// Parent
    pub parent: Option<NodeIndex<Ix>>,
    /// Color of the node
    pub color: Color,

    /// Key of the node, `None` only for the sentinel
    pub key: Option<K>,
}

// Convenient getter/setter methods
impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> &K {
        self.key.as_ref().unwrap()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left.unwrap()
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right.unwrap()
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent.unwrap()
    }

    /// Only the sentinel has no key. Tree walks compare indices instead;
    /// this is for code holding a bare node.
    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn take_key(&mut self) -> K {
        self.key.take().unwrap()
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            debug_assert!(
                !(node.is_sentinel() && matches!(color, Color::Red)),
                "sentinel must stay black"
            );
            node.color = color;
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            let _ignore = node.left.replace(left);
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            let _ignore = node.right.replace(right);
        }
    }

    /// Writes the parent link. The sentinel keeps no parent, so writes to it
    /// are dropped.
    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            if node.is_sentinel() {
                return;
            }
            let _ignore = node.parent.replace(parent);
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// A read-only handle to a real (non-sentinel) node of a [`RedBlackTree`].
///
/// Child and parent accessors return `None` where the tree links to its
/// sentinel, so a depth-first walk stops at every leaf edge.
///
/// # Example
/// ```rust
/// use rb_tree::{Color, RedBlackTree};
///
/// let tree: RedBlackTree<i32> = [10, 20, 30].into_iter().collect();
/// let root = tree.root().unwrap();
/// assert_eq!(root.key(), &20);
/// assert_eq!(root.color(), Color::Black);
/// assert_eq!(root.left().map(|n| *n.key()), Some(10));
/// assert!(root.parent().is_none());
/// ```
pub struct NodeRef<'a, K, Ix> {
    tree: &'a RedBlackTree<K, Ix>,
    idx: NodeIndex<Ix>,
}

impl<'a, K, Ix> NodeRef<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RedBlackTree<K, Ix>, idx: NodeIndex<Ix>) -> Option<Self> {
        (!idx.is_sentinel()).then_some(NodeRef { tree, idx })
    }

    fn node(&self) -> &'a Node<K, Ix> {
        &self.tree.nodes[self.idx.index()]
    }

    /// Arena slot of this node. Stable for the lifetime of the tree.
    #[inline]
    pub fn index(&self) -> NodeIndex<Ix> {
        self.idx
    }

    #[inline]
    pub fn key(&self) -> &'a K {
        self.node().key()
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.node().color()
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.node().is_red()
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.node().is_black()
    }

    #[inline]
    pub fn left(&self) -> Option<Self> {
        Self::new(self.tree, self.node().left())
    }

    #[inline]
    pub fn right(&self) -> Option<Self> {
        Self::new(self.tree, self.node().right())
    }

    #[inline]
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.tree, self.node().parent())
    }
}

impl<K, Ix: Copy> Clone for NodeRef<'_, K, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, Ix: Copy> Copy for NodeRef<'_, K, Ix> {}

impl<K, Ix> fmt::Debug for NodeRef<'_, K, Ix>
where
    K: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.idx)
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
