//! This crate exposes an unbalanced Binary Search Tree (BST) over any totally ordered type.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! may have child `Node`s. The invariants kept by this tree are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a value
//!    less than its own value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a value
//!    greater than or equal to its own value. Duplicates therefore always
//!    end up to the right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. This tree never rebalances so inserting
//! sorted input gives a height of `N`. Visiting the left subtree, then the
//! subtree root, then the right subtree yields the values in sorted order;
//! see [`OrderedBinaryTree::iter`].
//!
//! ## Deletion
//!
//! Nodes have no parent pointers. Removing a node replaces it in the slot
//! that owns it (the tree's root slot or a parent's `left`/`right`), found
//! while descending from the root. See [`OrderedBinaryTree::take`] for the
//! three ways a node is replaced.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod tree;

pub use error::InvariantError;
pub use iter::Iter;
pub use tree::{Found, Node, OrderedBinaryTree, Side};
