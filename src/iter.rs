//! In-order iteration over an [`OrderedBinaryTree`][crate::OrderedBinaryTree].
//!
//! This only uses the read-only [`Node`] accessors, the same ones available to code outside the
//! crate.

use std::fmt;
use std::iter::FusedIterator;

use crate::tree::Node;

/// Borrowing in-order iterator. Created by
/// [`OrderedBinaryTree::iter`][crate::OrderedBinaryTree::iter].
pub struct Iter<'a, T> {
    /// Nodes whose left subtree has been pushed but who haven't been yielded yet. The top of the
    /// stack is always the next value.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut next: Option<&'a Node<T>>) {
        while let Some(node) = next {
            self.stack.push(node);
            next = node.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// Manual so cloning the iterator doesn't require `T: Clone`.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
