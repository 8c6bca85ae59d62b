//! An unbalanced BST that owns its nodes through `Box`ed child slots. There are no parent
//! pointers: every structural change is a write into the slot (the root slot or some node's
//! `left`/`right`) that was reached while descending from the root.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::OrderedBinaryTree;
//!
//! let mut tree = OrderedBinaryTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert(1);
//! assert!(tree.contains(&1));
//!
//! // Equal values are kept and go to the right.
//! tree.insert(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Each removal takes out one copy.
//! assert!(tree.remove(&1));
//! assert!(tree.contains(&1));
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::trace;

use crate::error::InvariantError;
use crate::iter::Iter;

type Link<T> = Option<Box<Node<T>>>;

/// Which child slot of a node something hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The slot holding strictly smaller values.
    Left,
    /// The slot holding equal or greater values.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A Binary Search Tree without any rebalancing. Values less than a node go to its left and
/// values equal to or greater than it go to its right, so duplicates are allowed.
///
/// Inserting already sorted values builds a tree shaped like a linked list. `Drop`, `Clone`,
/// iteration and validation all use explicit stacks so that shape can't overflow the call stack.
pub struct OrderedBinaryTree<T> {
    root: Link<T>,
    len: usize,
}

/// A single node of an [`OrderedBinaryTree`]. Nodes are only ever handed out by shared
/// reference (see [`OrderedBinaryTree::root`]) so they can be used to walk the tree.
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

/// The result of [`OrderedBinaryTree::find`]: the matching value along with the node it hangs
/// from.
#[derive(Debug)]
pub struct Found<'a, T> {
    value: &'a T,
    parent: Option<(&'a T, Side)>,
    depth: usize,
}

impl<T> Default for OrderedBinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedBinaryTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Clone for OrderedBinaryTree<T>
where
    T: Clone,
{
    /// Copies the tree node for node so the clone has exactly the same shape.
    fn clone(&self) -> Self {
        Self {
            root: self.root().map(Node::clone_subtree),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for OrderedBinaryTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for OrderedBinaryTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for OrderedBinaryTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedBinaryTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> OrderedBinaryTree<T> {
    /// Generate a new, empty `OrderedBinaryTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if any. This is the hook for walking the tree from the outside; see
    /// [`Node::left`] and [`Node::right`].
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Iterates over the values in order. Equal values come out in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedBinaryTree;
    ///
    /// let tree: OrderedBinaryTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert!(tree.iter().copied().eq([1, 3, 4, 5, 7, 8, 9]));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root(), self.len)
    }

    /// The number of levels in the tree. An empty tree has height 0 and a lone root has
    /// height 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(node.left().map(|left| (left, level + 1)));
            stack.extend(node.right().map(|right| (right, level + 1)));
        }

        height
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        // Unlink children before each node is dropped so dropping never recurses.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Inserts the given value. Values less than a node go left and values equal to or greater
    /// than it go right, so inserting an existing value adds another copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedBinaryTree;
    ///
    /// let mut tree = OrderedBinaryTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert!(tree.iter().copied().eq([1, 2, 2]));
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        let mut depth = 0;
        while let Some(node) = slot {
            slot = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }

        *slot = Some(Node::new_boxed(value));
        self.len += 1;
        trace!("inserted node at depth {depth}, tree now holds {}", self.len);
    }

    /// Whether some node in the tree is equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedBinaryTree;
    ///
    /// let mut tree = OrderedBinaryTree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_some()
    }

    /// Finds the first node equal to `value` on the way down from the root and reports the node
    /// it hangs from. If several nodes are equal to `value`, the one closest to the root on the
    /// search path is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::{OrderedBinaryTree, Side};
    ///
    /// let tree: OrderedBinaryTree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// let found = tree.find(&8).unwrap();
    /// assert_eq!(found.value(), &8);
    /// assert_eq!(found.parent(), Some(&5));
    /// assert_eq!(found.side(), Some(Side::Right));
    ///
    /// // The root has no parent.
    /// assert_eq!(tree.find(&5).unwrap().parent(), None);
    /// assert!(tree.find(&4).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<Found<'_, T>>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut current = self.root();
        let mut depth = 0;
        while let Some(node) = current {
            let side = match value.cmp(&node.value) {
                Ordering::Equal => {
                    return Some(Found {
                        value: &node.value,
                        parent,
                        depth,
                    })
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            parent = Some((&node.value, side));
            current = node.child(side);
            depth += 1;
        }

        None
    }

    /// Removes one node equal to `value` from the tree. Returns whether anything was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedBinaryTree;
    ///
    /// let mut tree: OrderedBinaryTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert!(tree.remove(&5));
    /// assert!(!tree.remove(&5));
    /// assert!(tree.iter().copied().eq([1, 3, 4, 7, 8, 9]));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        self.take(value).is_some()
    }

    /// Removes one node equal to `value` from the tree and returns the value it held. If the tree
    /// does not contain `value`, nothing happens.
    ///
    /// The node is replaced in its parent's slot by:
    ///
    /// 1. its left child, when it has no right child;
    /// 2. its right child, when that child has no left child. The right child adopts the removed
    ///    node's left subtree;
    /// 3. otherwise its in-order successor (the leftmost node of its right subtree). The successor
    ///    is unlinked from its own parent first, then adopts both of the removed node's subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedBinaryTree;
    ///
    /// let mut tree = OrderedBinaryTree::new();
    /// tree.insert(String::from("a"));
    ///
    /// assert_eq!(tree.take(&String::from("a")), Some(String::from("a")));
    /// assert_eq!(tree.take(&String::from("a")), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let (slot, depth) = Self::slot_of(&mut self.root, value);
        let mut current = slot.take()?;

        let replacement = match current.right.take() {
            None => {
                trace!("removing node at depth {depth}: no right child");
                current.left.take()
            }
            Some(mut right) if right.left.is_none() => {
                trace!("removing node at depth {depth}: right child has no left child");
                right.left = current.left.take();
                Some(right)
            }
            Some(mut right) => {
                trace!("removing node at depth {depth}: replacing with in-order successor");
                let mut successor = Node::take_leftmost(&mut right);
                successor.left = current.left.take();
                successor.right = Some(right);
                Some(successor)
            }
        };

        if cfg!(debug_assertions) {
            if let Some(replacement) = &replacement {
                replacement.assert_children_ordered();
            }
        }

        *slot = replacement;
        debug_assert!(self.len > 0, "removed a node from a tree that records no nodes");
        self.len -= 1;

        let Node { value, .. } = *current;
        Some(value)
    }

    /// Walks the whole tree checking that every node sits on the correct side of all of its
    /// ancestors and that [`len`][Self::len] matches the number of reachable nodes.
    ///
    /// This is `O(n)` and is meant for tests and debugging.
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        T: Ord,
    {
        struct Bounds<'a, T> {
            /// Every value here must be `>=` this one.
            lower: Option<&'a T>,
            /// Every value here must be `<` this one.
            upper: Option<&'a T>,
        }

        let mut reachable = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root() {
            let bounds = Bounds {
                lower: None,
                upper: None,
            };
            stack.push((root, 0, bounds));
        }

        while let Some((node, depth, bounds)) = stack.pop() {
            reachable += 1;

            if bounds.lower.is_some_and(|lower| node.value < *lower) {
                return Err(InvariantError::OrderViolation {
                    depth,
                    side: Side::Right,
                });
            }
            if bounds.upper.is_some_and(|upper| node.value >= *upper) {
                return Err(InvariantError::OrderViolation {
                    depth,
                    side: Side::Left,
                });
            }

            if let Some(left) = node.left() {
                let left_bounds = Bounds {
                    lower: bounds.lower,
                    upper: Some(&node.value),
                };
                stack.push((left, depth + 1, left_bounds));
            }
            if let Some(right) = node.right() {
                let right_bounds = Bounds {
                    lower: Some(&node.value),
                    upper: bounds.upper,
                };
                stack.push((right, depth + 1, right_bounds));
            }
        }

        if reachable != self.len {
            return Err(InvariantError::CountMismatch {
                recorded: self.len,
                reachable,
            });
        }

        Ok(())
    }

    /// Descends from `slot` towards `value` and returns the first slot that either holds a node
    /// equal to `value` or is empty, along with its depth. The slot is the parent's own `left` or
    /// `right` field (or the root slot), so the side is never re-derived from values.
    fn slot_of<'a>(mut slot: &'a mut Link<T>, value: &T) -> (&'a mut Link<T>, usize)
    where
        T: Ord,
    {
        let mut depth = 0;
        loop {
            let side = match slot.as_deref() {
                None => break,
                Some(node) => match value.cmp(&node.value) {
                    Ordering::Equal => break,
                    Ordering::Less => Side::Left,
                    Ordering::Greater => Side::Right,
                },
            };
            slot = slot
                .as_deref_mut()
                .expect("side was chosen from an occupied slot")
                .child_mut(side);
            depth += 1;
        }

        (slot, depth)
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left().map(Node::value))
            .field("right", &self.right().map(Node::value))
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of the subtree holding values less than this one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the subtree holding values equal to or greater than this one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The child on the given side.
    pub fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Unlinks the leftmost node below `self` and returns it. Its right subtree takes its place
    /// in its parent's `left` slot, so the returned node has no children.
    ///
    /// ## Panics
    ///
    /// When `self` has no left child.
    fn take_leftmost(mut parent: &mut Self) -> Box<Self> {
        while parent.left().is_some_and(|left| left.left.is_some()) {
            parent = parent
                .left
                .as_deref_mut()
                .expect("loop condition checked the left child");
        }

        let mut leftmost = parent
            .left
            .take()
            .expect("Taking the leftmost node requires a left child");
        parent.left = leftmost.right.take();
        leftmost
    }

    /// Copies a subtree with a post-order walk: both children of a node are built before the
    /// node itself.
    fn clone_subtree(root: &Self) -> Box<Self>
    where
        T: Clone,
    {
        enum Step<'a, T> {
            Visit(Option<&'a Node<T>>),
            Build(&'a Node<T>),
        }

        let mut steps = vec![Step::Visit(Some(root))];
        let mut built: Vec<Link<T>> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(None) => built.push(None),
                Step::Visit(Some(node)) => {
                    steps.push(Step::Build(node));
                    steps.push(Step::Visit(node.right()));
                    steps.push(Step::Visit(node.left()));
                }
                Step::Build(node) => {
                    let right = built.pop().expect("right child built before parent");
                    let left = built.pop().expect("left child built before parent");
                    built.push(Some(Box::new(Self {
                        value: node.value.clone(),
                        left,
                        right,
                    })));
                }
            }
        }

        built
            .pop()
            .flatten()
            .expect("Cloning a node yields a node")
    }

    fn assert_children_ordered(&self)
    where
        T: Ord,
    {
        if let Some(left) = self.left() {
            assert!(left.value < self.value);
        }
        if let Some(right) = self.right() {
            assert!(right.value >= self.value);
        }
    }
}

impl<'a, T> Found<'a, T> {
    /// The value of the matching node.
    pub fn value(&self) -> &'a T {
        self.value
    }

    /// The value of the node whose child slot holds the match, or `None` if the match is the
    /// root.
    pub fn parent(&self) -> Option<&'a T> {
        self.parent.map(|(parent, _)| parent)
    }

    /// Which slot of the parent holds the match, or `None` if the match is the root.
    pub fn side(&self) -> Option<Side> {
        self.parent.map(|(_, side)| side)
    }

    /// How many edges lie between the root and the match.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
