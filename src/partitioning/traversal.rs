//! Generic recursions over a pair of bounding-volume hierarchies.
//!
//! A traversal node describes both hierarchies (which nodes are leaves, what their children
//! are) and implements the query-specific tests. The recursion drivers only decide in which
//! order these tests are run.

use crate::math::Real;

/// A node driven by [`collision_recurse`].
pub trait CollisionTraversalNode {
    /// Whether the node `b` of the first hierarchy is a leaf.
    fn is_first_node_leaf(&self, _b: usize) -> bool {
        true
    }

    /// Whether the node `b` of the second hierarchy is a leaf.
    fn is_second_node_leaf(&self, _b: usize) -> bool {
        true
    }

    /// Whether the first hierarchy should be descended before the second one.
    fn first_over_second(&self, _b1: usize, _b2: usize) -> bool {
        true
    }

    /// The children of the internal node `b` of the first hierarchy.
    fn first_children(&self, b: usize) -> (usize, usize) {
        (b, b)
    }

    /// The children of the internal node `b` of the second hierarchy.
    fn second_children(&self, b: usize) -> (usize, usize) {
        (b, b)
    }

    /// Returns `true` if the bounding volumes of `b1` and `b2` are disjoint, in which case
    /// the pair is culled.
    fn bv_testing(&mut self, b1: usize, b2: usize) -> bool;

    /// Runs the exact test between the two leaves `b1` and `b2`.
    fn leaf_testing(&mut self, b1: usize, b2: usize);

    /// Returns `true` if the traversal can be ended early.
    fn can_stop(&self) -> bool {
        false
    }
}

/// A node driven by [`distance_recurse`].
pub trait DistanceTraversalNode {
    /// Whether the node `b` of the first hierarchy is a leaf.
    fn is_first_node_leaf(&self, _b: usize) -> bool {
        true
    }

    /// Whether the node `b` of the second hierarchy is a leaf.
    fn is_second_node_leaf(&self, _b: usize) -> bool {
        true
    }

    /// Whether the first hierarchy should be descended before the second one.
    fn first_over_second(&self, _b1: usize, _b2: usize) -> bool {
        true
    }

    /// The children of the internal node `b` of the first hierarchy.
    fn first_children(&self, b: usize) -> (usize, usize) {
        (b, b)
    }

    /// The children of the internal node `b` of the second hierarchy.
    fn second_children(&self, b: usize) -> (usize, usize) {
        (b, b)
    }

    /// A lower bound of the distance between the contents of `b1` and `b2`.
    fn bv_testing(&mut self, b1: usize, b2: usize) -> Real;

    /// Runs the exact distance computation between the two leaves `b1` and `b2`.
    fn leaf_testing(&mut self, b1: usize, b2: usize);

    /// Decides whether the pair most recently tested by [`Self::bv_testing`] and not yet
    /// resolved, with the bound `c`, can be skipped.
    fn can_stop(&mut self, c: Real) -> bool;

    /// Exchanges the two most recent unresolved pairs tested by [`Self::bv_testing`], so
    /// that the next `can_stop` refers to the pair tested first.
    ///
    /// Nodes keeping per-pair data for `can_stop` must implement it.
    fn swap_last_bv_tests(&mut self) {}
}

/// Recursively tests the pair of nodes `(b1, b2)` for collision.
pub fn collision_recurse<N: CollisionTraversalNode + ?Sized>(node: &mut N, b1: usize, b2: usize) {
    let l1 = node.is_first_node_leaf(b1);
    let l2 = node.is_second_node_leaf(b2);

    if node.bv_testing(b1, b2) {
        return;
    }

    if l1 && l2 {
        node.leaf_testing(b1, b2);
        return;
    }

    if l2 || (!l1 && node.first_over_second(b1, b2)) {
        let (c1, c2) = node.first_children(b1);
        collision_recurse(node, c1, b2);

        if node.can_stop() {
            return;
        }

        collision_recurse(node, c2, b2);
    } else {
        let (c1, c2) = node.second_children(b2);
        collision_recurse(node, b1, c1);

        if node.can_stop() {
            return;
        }

        collision_recurse(node, b1, c2);
    }
}

/// Recursively computes the distance between the contents of the nodes `b1` and `b2`.
///
/// Both child pairs are tested with `bv_testing` before any of them is descended. The closer
/// pair is resolved first, so that the running distance is as tight as possible when the
/// farther one reaches `can_stop`. Every call to `can_stop` matches the most recent unresolved
/// `bv_testing`, after [`DistanceTraversalNode::swap_last_bv_tests`] when the first pair tested
/// is the closer one.
pub fn distance_recurse<N: DistanceTraversalNode + ?Sized>(node: &mut N, b1: usize, b2: usize) {
    let l1 = node.is_first_node_leaf(b1);
    let l2 = node.is_second_node_leaf(b2);

    if l1 && l2 {
        node.leaf_testing(b1, b2);
        return;
    }

    let (a, c) = if l2 || (!l1 && node.first_over_second(b1, b2)) {
        let (c1, c2) = node.first_children(b1);
        ((c1, b2), (c2, b2))
    } else {
        let (c1, c2) = node.second_children(b2);
        ((b1, c1), (b1, c2))
    };

    let da = node.bv_testing(a.0, a.1);
    let dc = node.bv_testing(c.0, c.1);

    let ((near, d_near), (far, d_far)) = if da < dc {
        node.swap_last_bv_tests();
        ((a, da), (c, dc))
    } else {
        ((c, dc), (a, da))
    };

    if !node.can_stop(d_near) {
        distance_recurse(node, near.0, near.1);
    }

    if !node.can_stop(d_far) {
        distance_recurse(node, far.0, far.1);
    }
}
