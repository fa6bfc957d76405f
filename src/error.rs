//! Errors reported by [`RedBlackTree::check_invariants`](crate::RedBlackTree::check_invariants).

use std::fmt::Debug;

use crate::index::NodeIndex;

/// The first structural violation found while walking a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation<Ix: Debug> {
    /// Slot 0 is missing or holds a key.
    #[error("slot 0 does not hold a sentinel")]
    MissingSentinel,

    /// The root points outside the arena.
    #[error("root {0:?} is outside the arena")]
    DanglingRoot(NodeIndex<Ix>),

    /// A child or parent link is absent or points outside the arena.
    #[error("node {node:?} has dangling link {link:?}")]
    DanglingLink {
        /// The node holding the link.
        node: NodeIndex<Ix>,
        /// The offending link.
        link: Option<NodeIndex<Ix>>,
    },

    /// A slot other than 0 has no key.
    #[error("node {0:?} has no key")]
    KeylessNode(NodeIndex<Ix>),

    /// The root is colored red.
    #[error("root {0:?} is red")]
    RedRoot(NodeIndex<Ix>),

    /// The root links to a parent other than the sentinel.
    #[error("root {root:?} has parent {parent:?}")]
    RootHasParent {
        /// The root node.
        root: NodeIndex<Ix>,
        /// The parent it links to.
        parent: NodeIndex<Ix>,
    },

    /// The sentinel has been colored red.
    #[error("sentinel is red")]
    RedSentinel,

    /// A red node has a red child.
    #[error("red node {parent:?} has red child {child:?}")]
    RedRedEdge {
        /// The red parent.
        parent: NodeIndex<Ix>,
        /// The red child.
        child: NodeIndex<Ix>,
    },

    /// The two subtrees of a node reach the sentinel through different numbers
    /// of black nodes.
    #[error("black height of {node:?} differs: left {left}, right {right}")]
    BlackHeightMismatch {
        /// The unbalanced node.
        node: NodeIndex<Ix>,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// A key is out of order relative to its ancestors.
    #[error("key of {node:?} breaks search order")]
    OrderViolation {
        /// The misplaced node.
        node: NodeIndex<Ix>,
    },

    /// A child does not link back to its parent.
    #[error("child {child:?} of {node:?} does not link back to it")]
    BrokenParentLink {
        /// The parent node.
        node: NodeIndex<Ix>,
        /// The child whose back-link is wrong.
        child: NodeIndex<Ix>,
    },

    /// The recorded length disagrees with the number of reachable nodes.
    #[error("tree records {expected} keys but {found} are reachable")]
    LengthMismatch {
        /// The recorded length.
        expected: usize,
        /// The reachable node count.
        found: usize,
    },
}
