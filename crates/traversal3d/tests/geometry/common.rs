use traversal3d::bounding_volume::BoundingVolume;
use traversal3d::math::{Isometry, Point, Real, Vector};
use traversal3d::partitioning::{BvhModel, DistanceTraversalNode};
use traversal3d::query::{
    ConservativeAdvancementState, ContactPoint, DefaultNarrowPhaseSolver, NarrowPhaseSolver,
    ShapeMeshConservativeAdvancementNode, ShapeMeshOrientedConservativeAdvancementNode,
    Unsupported,
};
use traversal3d::bounding_volume::{BvDistance, OrientedBvDistance};
use traversal3d::shape::{Shape, Triangle};

/// A flat square grid of `n * n` cells of size `cell`, in the plane `z = 0`.
pub fn grid<BV: BoundingVolume>(n: u32, cell: Real) -> BvhModel<BV> {
    bumpy_grid(n, cell, |_, _| 0.0)
}

/// A grid whose vertex heights are given by `height(i, j)`.
pub fn bumpy_grid<BV: BoundingVolume>(
    n: u32,
    cell: Real,
    mut height: impl FnMut(u32, u32) -> Real,
) -> BvhModel<BV> {
    let mut vertices = vec![];
    let mut triangles = vec![];
    let offset = n as Real * cell / 2.0;

    for i in 0..=n {
        for j in 0..=n {
            vertices.push(Point::new(
                i as Real * cell - offset,
                j as Real * cell - offset,
                height(i, j),
            ));
        }
    }

    for i in 0..n {
        for j in 0..n {
            let a = i * (n + 1) + j;
            triangles.push([a, a + n + 1, a + 1]);
            triangles.push([a + 1, a + n + 1, a + n + 2]);
        }
    }

    BvhModel::new(vertices, triangles).unwrap()
}

/// The exact distance between `shape` and `mesh`, by testing every triangle.
pub fn brute_force_distance<BV: BoundingVolume>(
    shape: &dyn Shape,
    pos1: &Isometry<Real>,
    mesh: &BvhModel<BV>,
    pos2: &Isometry<Real>,
) -> Real {
    (0..mesh.triangles().len() as u32)
        .map(|i| {
            let tri: Triangle = mesh.triangle(i).transformed(pos2);
            DefaultNarrowPhaseSolver
                .shape_triangle_distance(shape, pos1, &tri)
                .unwrap()
                .0
        })
        .fold(Real::MAX, Real::min)
}

/// A solver reporting a fixed set of penetrating contacts for every pair of shapes.
pub struct FixedContactsSolver {
    pub depths: Vec<Real>,
}

impl NarrowPhaseSolver for FixedContactsSolver {
    fn intersect(
        &self,
        _: &dyn Shape,
        _: &Isometry<Real>,
        _: &dyn Shape,
        _: &Isometry<Real>,
        contacts: Option<&mut Vec<ContactPoint>>,
    ) -> Result<bool, Unsupported> {
        if let Some(out) = contacts {
            out.extend(
                self.depths
                    .iter()
                    .map(|d| ContactPoint::new(Point::origin(), Vector::x(), *d)),
            );
        }

        Ok(!self.depths.is_empty())
    }

    fn shape_triangle_distance(
        &self,
        _: &dyn Shape,
        _: &Isometry<Real>,
        _: &Triangle,
    ) -> Result<(Real, Point<Real>, Point<Real>), Unsupported> {
        Err(Unsupported)
    }

    fn supports_intersection(&self, _: &dyn Shape, _: &dyn Shape) -> bool {
        true
    }

    fn supports_triangle_distance(&self, _: &dyn Shape) -> bool {
        false
    }
}

/// Gives access to the state of both kinds of conservative advancement nodes.
pub trait WithState {
    fn state(&self) -> &ConservativeAdvancementState;
}

impl<BV, D> WithState for ShapeMeshConservativeAdvancementNode<'_, BV, D>
where
    BV: BoundingVolume + BvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    fn state(&self) -> &ConservativeAdvancementState {
        ShapeMeshConservativeAdvancementNode::state(self)
    }
}

impl<BV, D> WithState for ShapeMeshOrientedConservativeAdvancementNode<'_, BV, D>
where
    BV: BoundingVolume + OrientedBvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    fn state(&self) -> &ConservativeAdvancementState {
        ShapeMeshOrientedConservativeAdvancementNode::state(self)
    }
}

/// Wraps a traversal node and records how the recursion drives it.
pub struct Recorder<N> {
    pub node: N,
    pub num_bv_tests: usize,
    pub num_can_stops: usize,
    pub max_stack_len: usize,
    pub min_distances: Vec<Real>,
    pub delta_ts: Vec<Real>,
}

impl<N: DistanceTraversalNode + WithState> Recorder<N> {
    pub fn new(node: N) -> Self {
        Self {
            node,
            num_bv_tests: 0,
            num_can_stops: 0,
            max_stack_len: 0,
            min_distances: vec![],
            delta_ts: vec![],
        }
    }

    fn record(&mut self) {
        let state = self.node.state();
        self.min_distances.push(state.min_distance);
        self.delta_ts.push(state.delta_t);
        self.max_stack_len = self.max_stack_len.max(state.stack.len());
    }
}

impl<N: DistanceTraversalNode + WithState> DistanceTraversalNode for Recorder<N> {
    fn is_first_node_leaf(&self, b: usize) -> bool {
        self.node.is_first_node_leaf(b)
    }

    fn is_second_node_leaf(&self, b: usize) -> bool {
        self.node.is_second_node_leaf(b)
    }

    fn first_over_second(&self, b1: usize, b2: usize) -> bool {
        self.node.first_over_second(b1, b2)
    }

    fn first_children(&self, b: usize) -> (usize, usize) {
        self.node.first_children(b)
    }

    fn second_children(&self, b: usize) -> (usize, usize) {
        self.node.second_children(b)
    }

    fn bv_testing(&mut self, b1: usize, b2: usize) -> Real {
        self.num_bv_tests += 1;
        let d = self.node.bv_testing(b1, b2);
        self.record();
        d
    }

    fn leaf_testing(&mut self, b1: usize, b2: usize) {
        self.node.leaf_testing(b1, b2);
        self.record();
    }

    fn can_stop(&mut self, c: Real) -> bool {
        // The entry resolved by this call is the one whose volume distance is `c`.
        let top = self.node.state().stack.last().map(|entry| entry.d);
        assert_eq!(top, Some(c));
        self.num_can_stops += 1;
        let stop = self.node.can_stop(c);
        self.record();
        stop
    }

    fn swap_last_bv_tests(&mut self) {
        self.node.swap_last_bv_tests();
    }
}

pub fn assert_non_increasing(values: &[Real]) {
    for w in values.windows(2) {
        assert!(w[1] <= w[0], "{} followed by {}", w[0], w[1]);
    }
}
