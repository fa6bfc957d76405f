use log::{debug, trace};

use crate::error::InvariantViolation;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{InsertionOrder, IntoIter, Iter};
use crate::node::{Color, Node, NodeRef};

/// An ordered collection of keys kept balanced by red-black coloring.
///
/// Nodes live in an append-only arena; slot 0 is this tree's sentinel, which
/// terminates every leaf edge and stands in for the root while the tree is
/// empty.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedBlackTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of keys in the tree
    pub(crate) len: usize,
}

impl<K, Ix> RedBlackTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RedBlackTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        RedBlackTree {
            nodes,
            root: NodeIndex::sentinel(),
            len: 0,
        }
    }

    /// Insert a key into the tree.
    ///
    /// Keys equal to one already present are inserted again and placed after
    /// it in order.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(10);
    /// tree.insert(20);
    /// tree.insert(10);
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&10, &10, &20]);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) {
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(key));
        self.insert_inner(node_idx);
    }

    /// Check if the tree holds a key equal to `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<_> = [5, 3, 8].into_iter().collect();
    /// assert!(tree.contains(&3));
    /// assert!(!tree.contains(&4));
    /// ```
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        !self.search(key).is_sentinel()
    }

    /// Return the smallest key in the tree.
    #[inline]
    pub fn first(&self) -> Option<&K> {
        NodeRef::new(self, self.tree_minimum(self.root)).map(|n| n.key())
    }

    /// Return the largest key in the tree.
    #[inline]
    pub fn last(&self) -> Option<&K> {
        NodeRef::new(self, self.tree_maximum(self.root)).map(|n| n.key())
    }

    /// Remove all keys from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = NodeIndex::sentinel();
        self.len = 0;
    }

    /// Walk the whole tree and report the first broken red-black or
    /// search-tree property.
    ///
    /// Trees built through [`insert`](Self::insert) always pass; this is meant
    /// for trees obtained some other way (e.g. deserialized) and for tests.
    /// The arena is validated before any link is followed, so a malformed
    /// tree yields an error rather than a panic.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<_> = (1..=100).collect();
    /// assert_eq!(tree.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation<Ix>> {
        self.check_arena()?;
        if !self.root.is_sentinel() {
            if self.node_ref(self.root, Node::is_red) {
                return Err(InvariantViolation::RedRoot(self.root));
            }
            let parent = self.node_ref(self.root, Node::parent);
            if !parent.is_sentinel() {
                return Err(InvariantViolation::RootHasParent {
                    root: self.root,
                    parent,
                });
            }
        }
        let mut count = 0;
        let _black_height = self.check_subtree(self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found: count,
            });
        }
        Ok(())
    }
}

impl<K, Ix> RedBlackTree<K, Ix>
where
    Ix: IndexType,
{
    /// Return the root node, or `None` if the tree is empty.
    #[inline]
    pub fn root(&self) -> Option<NodeRef<'_, K, Ix>> {
        NodeRef::new(self, self.root)
    }

    /// Get an iterator over the keys of the tree, in order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, Ix> {
        Iter::new(self)
    }

    /// Get an iterator over the keys of the tree in the order they were
    /// inserted.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.insertion_order().collect::<Vec<_>>(), [&3, &1, &2]);
    /// ```
    #[inline]
    #[must_use]
    pub fn insertion_order(&self) -> InsertionOrder<'_, K, Ix> {
        InsertionOrder::new(self)
    }

    /// Number of nodes on the longest path from the root to the sentinel.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((x, depth)) = stack.pop() {
            if x.is_sentinel() {
                height = height.max(depth);
                continue;
            }
            stack.push((self.node_ref(x, Node::left), depth + 1));
            stack.push((self.node_ref(x, Node::right), depth + 1));
        }
        height
    }

    /// Number of black nodes on the path from the root to the sentinel,
    /// counting the root. Every such path agrees on this number.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<_> = (1..=7).collect();
    /// assert_eq!(tree.black_height(), 2);
    /// ```
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut x = self.root;
        while !x.is_sentinel() {
            if self.node_ref(x, Node::is_black) {
                count += 1;
            }
            x = self.node_ref(x, Node::left);
        }
        count
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> RedBlackTree<K>
where
    K: Ord,
{
    /// Create an empty `RedBlackTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, Ix> Default for RedBlackTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, Ix> Extend<K> for RedBlackTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, Ix> FromIterator<K> for RedBlackTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = Self::with_capacity(iter.size_hint().0);
        tree.extend(iter);
        tree
    }
}

impl<'a, K, Ix> IntoIterator for &'a RedBlackTree<K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Ix> IntoIterator for RedBlackTree<K, Ix>
where
    Ix: IndexType,
{
    type Item = K;
    type IntoIter = IntoIter<K, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<K, Ix> RedBlackTree<K, Ix>
where
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, Ix> {
        Node {
            key: None,
            left: Some(NodeIndex::sentinel()),
            right: Some(NodeIndex::sentinel()),
            parent: None,
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(key: K) -> Node<K, Ix> {
        Node {
            key: Some(key),
            left: Some(NodeIndex::sentinel()),
            right: Some(NodeIndex::sentinel()),
            parent: Some(NodeIndex::sentinel()),
            color: Color::Red,
        }
    }
}

impl<K, Ix> RedBlackTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Insert a node into the tree.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = NodeIndex::sentinel();
        let mut x = self.root;

        while !x.is_sentinel() {
            y = x;
            if self.node_ref(z, Node::key) < self.node_ref(x, Node::key) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if y.is_sentinel() {
            self.root = z;
        } else if self.node_ref(z, Node::key) < self.node_ref(y, Node::key) {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }
        debug!("inserted {z:?} under {y:?}");

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
    }

    /// Search for the first node holding `key` on the descent path.
    fn search(&self, key: &K) -> NodeIndex<Ix> {
        let mut x = self.root;
        while !x.is_sentinel() {
            let xk = self.node_ref(x, Node::key);
            if key == xk {
                break;
            }
            if key < xk {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        x
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    trace!("fixup {z:?}: red uncle {y:?}, recolor");
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        trace!("fixup {z:?}: inner child, rotate parent left");
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    trace!("fixup {z:?}: outer child, rotate grandparent right");
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    trace!("fixup {z:?}: red uncle {y:?}, recolor");
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        trace!("fixup {z:?}: inner child, rotate parent right");
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    trace!("fixup {z:?}: outer child, rotate grandparent left");
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Check that slot 0 is a black sentinel, that every other slot has a key,
    /// and that every link points inside the arena. Once this passes, the
    /// walk can follow any link without leaving the arena.
    fn check_arena(&self) -> Result<(), InvariantViolation<Ix>> {
        let sentinel = self
            .nodes
            .first()
            .filter(|s| s.is_sentinel())
            .ok_or(InvariantViolation::MissingSentinel)?;
        if sentinel.is_red() {
            return Err(InvariantViolation::RedSentinel);
        }
        let in_arena =
            |link: Option<NodeIndex<Ix>>| link.is_some_and(|l| l.index() < self.nodes.len());
        if !in_arena(Some(self.root)) {
            return Err(InvariantViolation::DanglingRoot(self.root));
        }
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            let idx = NodeIndex::new(i);
            if node.is_sentinel() {
                return Err(InvariantViolation::KeylessNode(idx));
            }
            for link in [node.left, node.right, node.parent] {
                if !in_arena(link) {
                    return Err(InvariantViolation::DanglingLink { node: idx, link });
                }
            }
        }
        Ok(())
    }

    /// Walk a subtree checking order, links and colors, returning its black
    /// height. `lower` and `upper` bound the keys allowed below `x`.
    fn check_subtree<'a>(
        &'a self,
        x: NodeIndex<Ix>,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
        count: &mut usize,
    ) -> Result<usize, InvariantViolation<Ix>> {
        if x.is_sentinel() {
            return Ok(0);
        }
        *count += 1;
        // a link cycle would otherwise recurse forever
        if *count > self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found: *count,
            });
        }
        let key = self.node_ref(x, Node::key);
        if lower.is_some_and(|l| key < l) || upper.is_some_and(|u| key > u) {
            return Err(InvariantViolation::OrderViolation { node: x });
        }
        let left = self.node_ref(x, Node::left);
        let right = self.node_ref(x, Node::right);
        for child in [left, right] {
            if child.is_sentinel() {
                continue;
            }
            if self.node_ref(child, |c| c.parent) != Some(x) {
                return Err(InvariantViolation::BrokenParentLink { node: x, child });
            }
            if self.node_ref(x, Node::is_red) && self.node_ref(child, Node::is_red) {
                return Err(InvariantViolation::RedRedEdge { parent: x, child });
            }
        }
        let left_height = self.check_subtree(left, lower, Some(key), count)?;
        let right_height = self.check_subtree(right, Some(key), upper, count)?;
        if left_height != right_height {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: x,
                left: left_height,
                right: right_height,
            });
        }
        Ok(left_height + usize::from(self.node_ref(x, Node::is_black)))
    }
}

impl<K, Ix> RedBlackTree<K, Ix>
where
    Ix: IndexType,
{
    /// Binary tree left rotate.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no right child.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        assert!(
            !self.node_ref(x, Node::right).is_sentinel(),
            "left rotation of {x:?} without a right child"
        );
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        self.left_mut(y, Node::set_parent(x));

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
        trace!("rotated {x:?} left under {y:?}");
    }

    /// Binary tree right rotate.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no left child.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        assert!(
            !self.node_ref(x, Node::left).is_sentinel(),
            "right rotation of {x:?} without a left child"
        );
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        self.right_mut(y, Node::set_parent(x));

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
        trace!("rotated {x:?} right under {y:?}");
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.node_ref(x, Node::parent).is_sentinel() {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the minimum key.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !x.is_sentinel() && !self.node_ref(x, Node::left).is_sentinel() {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !x.is_sentinel() && !self.node_ref(x, Node::right).is_sentinel() {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, Ix> RedBlackTree<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

#[cfg(feature = "graphviz")]
impl<K, Ix> RedBlackTree<K, Ix>
where
    K: std::fmt::Display,
    Ix: IndexType,
{
    /// Render the tree as a Graphviz digraph.
    ///
    /// Nodes are filled with their color and labelled with their key; every
    /// empty child edge ends in a gray `NIL` leaf.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<_> = [1].into_iter().collect();
    /// let dot = tree.to_dot();
    /// assert!(dot.contains("1 [label=\"1\", fillcolor=black, fontcolor=white]"));
    /// assert!(dot.contains("1 -> nil_1_L"));
    /// ```
    pub fn to_dot(&self) -> String {
        use std::fmt::Write;

        let mut dot = String::from("digraph {\n    node [shape=circle, style=filled]\n");
        let mut stack = vec![];
        if !self.root.is_sentinel() {
            stack.push(self.root);
        }
        while let Some(x) = stack.pop() {
            let id = x.index();
            let fill = if self.node_ref(x, Node::is_red) {
                "red"
            } else {
                "black"
            };
            let label = self.node_ref(x, Node::key).to_string().replace('"', "\\\"");
            let _ignore = writeln!(
                dot,
                "    {id} [label=\"{label}\", fillcolor={fill}, fontcolor=white]"
            );
            let children = [
                (self.node_ref(x, Node::left), "L"),
                (self.node_ref(x, Node::right), "R"),
            ];
            for (child, side) in children {
                if child.is_sentinel() {
                    let _ignore = writeln!(
                        dot,
                        "    nil_{id}_{side} [label=\"NIL\", color=gray, fontcolor=gray]"
                    );
                    let _ignore = writeln!(dot, "    {id} -> nil_{id}_{side}");
                } else {
                    let _ignore = writeln!(dot, "    {id} -> {}", child.index());
                }
            }
            // right first so the left subtree is emitted first
            for (child, _) in children.into_iter().rev() {
                if !child.is_sentinel() {
                    stack.push(child);
                }
            }
        }
        dot.push_str("}\n");
        dot
    }

    /// Write the Graphviz rendering of the tree to `path`.
    pub fn draw(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_dot())
    }
}
