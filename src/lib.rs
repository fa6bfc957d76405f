//! `rb_tree` is an ordered key collection based on a red-black tree.
//!
//! Insertion descends the tree as an ordinary binary search tree, links the new
//! key as a red leaf, and then restores the red-black properties with the
//! classical fixup: recoloring when the uncle is red, one or two rotations when
//! it is black. Every operation therefore takes at most O(logN) time.
//!
//! The tree uses an array of nodes to simulate pointers:
//! children and parents are indices into that array, and slot 0 holds the
//! tree's own sentinel, a black keyless node that terminates every leaf edge.
//! There are no reference cycles and no global state, and the tree is `Send`
//! whenever its keys are.
//!
//! Keys do not have to be unique. A key equal to one already present is routed
//! to the right and stored again.
//!
//! # Example
//!
//! ```rust
//! use rb_tree::{Color, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for key in [10, 20, 15] {
//!     tree.insert(key);
//! }
//! let root = tree.root().unwrap();
//! assert_eq!((root.key(), root.color()), (&15, Color::Black));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), [&10, &15, &20]);
//! ```
//!

mod error;
mod index;
mod iter;
mod node;
mod tree;


pub use error::InvariantViolation;
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{InsertionOrder, IntoIter, Iter};
pub use node::{Color, NodeRef};
pub use tree::RedBlackTree;
