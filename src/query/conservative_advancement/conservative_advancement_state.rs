use crate::math::{Point, Real};
use crate::query::conservative_advancement::ContinuousCollisionRequest;
use smallvec::SmallVec;

/// A pair of bounding volumes tested during a conservative-advancement traversal and not yet
/// resolved.
///
/// Entries are pushed by `bv_testing` and popped by the matching `can_stop`, so the stack
/// mirrors the recursion path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConservativeAdvancementStackData {
    /// Witness point on the shape's bounding volume, in world-space.
    pub p1: Point<Real>,
    /// Witness point on the mesh node's bounding volume, in world-space.
    pub p2: Point<Real>,
    /// Node index on the shape side.
    pub c1: usize,
    /// Node index on the mesh side.
    pub c2: usize,
    /// Distance between both bounding volumes.
    pub d: Real,
}

/// The mutable state of one conservative-advancement query.
///
/// It is carried from one traversal pass to the next one, and is never shared between queries.
#[derive(Clone, Debug)]
pub struct ConservativeAdvancementState {
    /// Smallest shape-triangle distance found during the current pass.
    pub min_distance: Real,
    /// Closest point on the shape, in world-space.
    pub closest_p1: Point<Real>,
    /// Closest point on the mesh, in world-space.
    pub closest_p2: Point<Real>,
    /// The triangle achieving `min_distance`.
    pub last_triangle: Option<u32>,
    /// The time step guaranteed to be collision-free, for the current pass.
    pub delta_t: Real,
    /// The time of contact accumulated so far.
    pub toc: Real,
    /// Time steps smaller than this are considered a contact.
    pub t_err: Real,
    /// Early-stop aggressiveness. Values smaller than 1 prune more subtrees.
    pub w: Real,
    /// Absolute tolerance on the distance.
    pub abs_err: Real,
    /// Relative tolerance on the distance.
    pub rel_err: Real,
    /// The bounding-volume pairs awaiting their `can_stop`.
    pub stack: SmallVec<[ConservativeAdvancementStackData; 32]>,
    /// Number of bounding-volume pairs tested.
    pub num_bv_tests: usize,
    /// Number of shape-triangle distances computed.
    pub num_leaf_tests: usize,
}

impl Default for ConservativeAdvancementState {
    fn default() -> Self {
        Self {
            min_distance: Real::MAX,
            closest_p1: Point::origin(),
            closest_p2: Point::origin(),
            last_triangle: None,
            delta_t: 1.0,
            toc: 0.0,
            t_err: 1.0e-4,
            w: 1.0,
            abs_err: 0.0,
            rel_err: 0.0,
            stack: SmallVec::new(),
            num_bv_tests: 0,
            num_leaf_tests: 0,
        }
    }
}

impl ConservativeAdvancementState {
    /// A fresh state using the tolerances of `request`.
    pub fn from_request(request: &ContinuousCollisionRequest) -> Self {
        Self {
            t_err: request.toc_err,
            w: request.w,
            abs_err: request.abs_err,
            rel_err: request.rel_err,
            ..Self::default()
        }
    }

    /// Prepares this state for a new traversal pass.
    pub fn begin_pass(&mut self) {
        self.min_distance = Real::MAX;
        self.delta_t = 1.0;
        self.stack.clear();
    }

    /// Whether a subtree at distance `c` cannot improve `min_distance` beyond the tolerances.
    #[inline]
    pub fn is_prunable(&self, c: Real) -> bool {
        c >= self.w * (self.min_distance - self.abs_err)
            && c * (1.0 + self.rel_err) >= self.w * self.min_distance
    }

    /// Exchanges the two most recent stack entries, when the recursion resolves the pair it
    /// tested first before the other one.
    #[inline]
    pub fn swap_last_two_entries(&mut self) {
        let n = self.stack.len();
        debug_assert!(n >= 2, "fewer than two pending volume pairs");

        if n >= 2 {
            self.stack.swap(n - 2, n - 1);
        }
    }

    /// Lowers `delta_t` to `cur_delta_t` if it is smaller.
    #[inline]
    pub fn tighten_delta_t(&mut self, cur_delta_t: Real) {
        if cur_delta_t < self.delta_t {
            self.delta_t = cur_delta_t;
        }
    }
}
