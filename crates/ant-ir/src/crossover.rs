//! Subtree crossover between two programs.

use crate::node::Node;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Swap a random subtree of `first` with a random subtree of `second`.
///
/// Crossover points are pre-order indices in `[1, node_count - 1]`, the root is
/// never exchanged. A parent that is a single leaf has no such point, in which
/// case both parents are returned unchanged.
pub fn crossover(first: &Node, second: &Node, rng: &mut ChaCha8Rng) -> (Node, Node) {
    let mut child_a = first.clone();
    let mut child_b = second.clone();

    let count_a = child_a.node_count();
    let count_b = child_b.node_count();
    if count_a < 2 || count_b < 2 {
        return (child_a, child_b);
    }

    let point_a = rng.gen_range(1..count_a);
    let point_b = rng.gen_range(1..count_b);
    trace!(point_a, point_b, count_a, count_b, "subtree crossover");

    swap_subtrees(&mut child_a, point_a, &mut child_b, point_b);
    (child_a, child_b)
}

/// Exchange the subtree at `index_a` of `a` with the subtree at `index_b` of `b`.
///
/// Returns false, leaving both trees untouched, if either index is out of range.
pub fn swap_subtrees(a: &mut Node, index_a: usize, b: &mut Node, index_b: usize) -> bool {
    match (a.subtree_mut(index_a), b.subtree_mut(index_b)) {
        (Some(slot_a), Some(slot_b)) => {
            std::mem::swap(slot_a, slot_b);
            true
        }
        _ => false,
    }
}
