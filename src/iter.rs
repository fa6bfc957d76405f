use std::iter::FusedIterator;

use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RedBlackTree;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, Ix>(tree_ref: &RedBlackTree<K, Ix>, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>>
where
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !x.is_sentinel() {
        nodes.push(x);
        x = tree_ref.node_ref(x, Node::left);
    }
    nodes
}

/// An in-order iterator over the keys of a `RedBlackTree`.
#[derive(Debug)]
pub struct Iter<'a, K, Ix> {
    /// Reference to the tree
    tree_ref: &'a RedBlackTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Keys not yet yielded
    remaining: usize,
}

impl<'a, K, Ix> Iter<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RedBlackTree<K, Ix>) -> Self {
        Iter {
            tree_ref,
            stack: left_link(tree_ref, tree_ref.root),
            remaining: tree_ref.len(),
        }
    }
}

impl<'a, K, Ix> Iterator for Iter<'a, K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack.extend(left_link(
            self.tree_ref,
            self.tree_ref.node_ref(x, Node::right),
        ));
        self.remaining = self.remaining.saturating_sub(1);
        Some(self.tree_ref.node_ref(x, Node::key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, Ix: IndexType> ExactSizeIterator for Iter<'_, K, Ix> {}

impl<K, Ix: IndexType> FusedIterator for Iter<'_, K, Ix> {}

/// An in-order owning iterator over the keys of a `RedBlackTree`.
#[derive(Debug)]
pub struct IntoIter<K, Ix> {
    tree: RedBlackTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<K, Ix> IntoIter<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: RedBlackTree<K, Ix>) -> Self {
        let stack = left_link(&tree, tree.root);
        IntoIter { tree, stack }
    }
}

impl<K, Ix> Iterator for IntoIter<K, Ix>
where
    Ix: IndexType,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack.extend(left_link(
            &self.tree,
            self.tree.node_ref(x, Node::right),
        ));
        Some(self.tree.node_mut(x, Node::take_key))
    }
}

impl<K, Ix: IndexType> FusedIterator for IntoIter<K, Ix> {}

/// An iterator over the keys of a `RedBlackTree` in insertion order.
///
/// The arena only ever grows, so walking it slot by slot after the sentinel
/// replays the insertions. The walk is bounded by the arena rather than the
/// recorded length, and keyless slots are skipped.
#[derive(Debug)]
pub struct InsertionOrder<'a, K, Ix> {
    tree_ref: &'a RedBlackTree<K, Ix>,
    /// Last slot visited
    cur: NodeIndex<Ix>,
}

impl<'a, K, Ix> InsertionOrder<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RedBlackTree<K, Ix>) -> Self {
        InsertionOrder {
            tree_ref,
            cur: NodeIndex::sentinel(),
        }
    }

    /// Slots after `cur` still to visit.
    fn slots_left(&self) -> usize {
        self.tree_ref
            .nodes
            .len()
            .saturating_sub(self.cur.index() + 1)
    }
}

impl<'a, K, Ix> Iterator for InsertionOrder<'a, K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.slots_left() > 0 {
            self.cur = self.cur.incre();
            if let Some(key) = self.tree_ref.node_ref(self.cur, |n| n.key.as_ref()) {
                return Some(key);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots_left()))
    }
}

impl<K, Ix: IndexType> FusedIterator for InsertionOrder<'_, K, Ix> {}
