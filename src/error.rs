//! Errors reported by [`OrderedBinaryTree::validate`][crate::OrderedBinaryTree::validate].
//!
//! Nothing in the normal API fails: looking up or removing a missing value is
//! a plain negative answer. These errors only describe a tree whose structure
//! has been corrupted, which is a bug in this crate.

use crate::tree::Side;

/// A broken structural invariant found while walking the tree.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// The recorded length disagrees with the number of nodes reachable from the root.
    #[error("tree records {recorded} nodes but {reachable} are reachable from the root")]
    CountMismatch {
        /// What [`len`][crate::OrderedBinaryTree::len] reports.
        recorded: usize,
        /// How many nodes a full walk found.
        reachable: usize,
    },
    /// A node is out of order with respect to one of its ancestors.
    #[error("node at depth {depth} breaks the ordering of the {side} subtree it lives in")]
    OrderViolation {
        /// Depth of the offending node (the root is at depth 0).
        depth: usize,
        /// Which subtree of the violated ancestor the node was found in.
        side: Side,
    },
}
