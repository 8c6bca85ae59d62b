use ordered_bst::{Node, OrderedBinaryTree};
use quickcheck_macros::quickcheck;

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and a sorted `Vec`.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same multiset of values in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedBinaryTree<T>, model: &mut Vec<T>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                let len = tree.len();
                tree.insert(x.clone());
                let at = model.partition_point(|y| y <= x);
                model.insert(at, x.clone());
                if tree.len() != len + 1 {
                    return false;
                }
            }
            Op::Remove(x) => {
                let len = tree.len();
                let expected = model.binary_search(x).ok().map(|at| model.remove(at));
                let removed = tree.remove(x);
                if removed != expected.is_some() {
                    return false;
                }
                if tree.len() != len - usize::from(removed) {
                    return false;
                }
            }
        }
    }

    true
}

/// Builds the in-order sequence using nothing but the public node accessors, counting nodes on
/// the way. Stops early if it sees more nodes than the tree claims to hold, which would mean a
/// node is reachable twice.
fn walk<T: Clone>(tree: &OrderedBinaryTree<T>) -> Option<Vec<T>> {
    let mut out = Vec::with_capacity(tree.len());
    let mut stack: Vec<&Node<T>> = Vec::new();
    let mut next = tree.root();
    loop {
        while let Some(node) = next {
            stack.push(node);
            next = node.left();
        }
        let Some(node) = stack.pop() else {
            break;
        };
        out.push(node.value().clone());
        if out.len() > tree.len() {
            return None;
        }
        next = node.right();
    }

    Some(out)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = OrderedBinaryTree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model)
        && walk(&tree).as_ref() == Some(&model)
        && tree.validate().is_ok()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: OrderedBinaryTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x)) && tree.len() == xs.len()
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedBinaryTree<_> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(*x))
        .all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    init_logging();
    let mut tree: OrderedBinaryTree<_> = xs.iter().copied().collect();
    for remove in &removes {
        // Take out every copy.
        while tree.remove(remove) {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !removes.contains(x));
    still_present.sort();

    removes.iter().all(|x| !tree.contains(x))
        && tree.iter().copied().eq(still_present)
        && tree.validate().is_ok()
}

#[quickcheck]
fn insert_then_remove_round_trips(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: OrderedBinaryTree<_> = xs.iter().copied().collect();
    let before = walk(&tree);

    tree.insert(x);
    tree.remove(&x) && walk(&tree) == before
}

#[test]
fn scenario_lookup_and_order() {
    let tree: OrderedBinaryTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();

    assert!(tree.contains(&4));
    assert!(!tree.contains(&6));
    assert_eq!(walk(&tree), Some(vec![1, 3, 4, 5, 7, 8, 9]));
}

#[test]
fn scenario_remove_root_uses_successor() {
    init_logging();
    let mut tree: OrderedBinaryTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();

    assert!(tree.remove(&5));
    assert_eq!(walk(&tree), Some(vec![1, 3, 4, 7, 8, 9]));
    assert_eq!(tree.root().map(Node::value), Some(&7));
}

#[test]
fn scenario_remove_from_empty() {
    let mut tree = OrderedBinaryTree::<u8>::new();

    assert!(!tree.remove(&0));
    assert_eq!(tree.len(), 0);
}

#[test]
fn scenario_single_value_round_trip() {
    let mut tree = OrderedBinaryTree::new();
    tree.insert(10);

    assert!(tree.remove(&10));
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert!(!tree.contains(&10));
}

#[test]
fn scenario_remove_leaf_keeps_sibling() {
    let mut tree: OrderedBinaryTree<_> = [5, 3, 8, 7, 9].into_iter().collect();

    assert!(tree.remove(&3));
    let root = tree.root().unwrap();
    assert!(root.left().is_none());
    assert_eq!(walk(&tree), Some(vec![5, 7, 8, 9]));
}

#[test]
fn scenario_right_child_absorbs_left_subtree() {
    let mut tree: OrderedBinaryTree<_> = [5, 2, 8, 1, 3].into_iter().collect();

    // 8 has no left child, so it takes 5's place and adopts the subtree under 2.
    assert!(tree.remove(&5));
    let root = tree.root().unwrap();
    assert_eq!(root.value(), &8);
    assert_eq!(root.left().map(Node::value), Some(&2));
    assert!(root.right().is_none());
    assert_eq!(walk(&tree), Some(vec![1, 2, 3, 8]));
}

#[test]
fn removals_with_logger_installed() {
    init_logging();
    init_logging();
    let mut tree: OrderedBinaryTree<_> = [5, 3, 8, 1, 4, 7, 9, 6].into_iter().collect();

    // Leaf, right child without a left child, leaf, no right child, then the successor case.
    for value in [1, 3, 9, 8, 5] {
        assert!(tree.remove(&value));
        assert_eq!(tree.validate(), Ok(()));
    }
    assert_eq!(walk(&tree), Some(vec![4, 6, 7]));
}
