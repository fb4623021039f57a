use crate::bounding_volume::{BoundingSphere, BoundingVolume, ObbRss, OrientedBvDistance, Rss};
use crate::math::{Isometry, Real};
use crate::motion::Motion;
use crate::partitioning::{BvhModel, DistanceTraversalNode};
use crate::query::conservative_advancement::mesh_shape_conservative_advancement::{
    mesh_shape_conservative_advancement_oriented_can_stop,
    mesh_shape_conservative_advancement_oriented_leaf_testing,
};
use crate::query::conservative_advancement::{
    ConservativeAdvancementStackData, ConservativeAdvancementState,
};
use crate::query::{NarrowPhaseSolver, Unsupported};
use crate::shape::Shape;

/// One conservative-advancement pass between a shape and a mesh with an oriented
/// bounding-volume hierarchy.
///
/// The mesh is only borrowed: its volumes stay in its local frame and the relative position of
/// the shape is folded into every volume distance instead. Several queries may thus share the
/// same mesh.
pub struct ShapeMeshOrientedConservativeAdvancementNode<'a, BV, D: ?Sized> {
    shape: &'a dyn Shape,
    pos1: Isometry<Real>,
    mesh: &'a BvhModel<BV>,
    pos2: Isometry<Real>,
    pos21: Isometry<Real>,
    solver: &'a D,
    motion1: &'a dyn Motion,
    motion2: &'a dyn Motion,
    shape_bv: BV,
    shape_sphere: BoundingSphere,
    state: ConservativeAdvancementState,
}

/// Oriented conservative advancement node for meshes with an RSS hierarchy.
pub type ShapeMeshConservativeAdvancementNodeRss<'a, D> =
    ShapeMeshOrientedConservativeAdvancementNode<'a, Rss, D>;

/// Oriented conservative advancement node for meshes with an OBB-RSS hierarchy.
pub type ShapeMeshConservativeAdvancementNodeObbRss<'a, D> =
    ShapeMeshOrientedConservativeAdvancementNode<'a, ObbRss, D>;

impl<'a, BV, D> ShapeMeshOrientedConservativeAdvancementNode<'a, BV, D>
where
    BV: BoundingVolume + OrientedBvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    /// Prepares a pass between `shape` at `pos1` and `mesh` at `pos2`.
    pub fn new(
        shape: &'a dyn Shape,
        pos1: Isometry<Real>,
        mesh: &'a BvhModel<BV>,
        pos2: Isometry<Real>,
        solver: &'a D,
        motion1: &'a dyn Motion,
        motion2: &'a dyn Motion,
        state: ConservativeAdvancementState,
    ) -> Result<Self, Unsupported> {
        if !solver.supports_triangle_distance(shape) {
            return Err(Unsupported);
        }

        let shape_bv = BV::from_aabb(&shape.compute_local_aabb());
        let shape_sphere = shape_bv.bounding_sphere();

        Ok(Self {
            shape,
            pos1,
            mesh,
            pos2,
            pos21: pos2.inv_mul(&pos1),
            solver,
            motion1,
            motion2,
            shape_bv,
            shape_sphere,
            state,
        })
    }

    /// The state of the query.
    #[inline]
    pub fn state(&self) -> &ConservativeAdvancementState {
        &self.state
    }

    /// Gives the state back, to carry it into the next pass.
    #[inline]
    pub fn into_state(self) -> ConservativeAdvancementState {
        self.state
    }
}

impl<BV, D> DistanceTraversalNode for ShapeMeshOrientedConservativeAdvancementNode<'_, BV, D>
where
    BV: BoundingVolume + OrientedBvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    #[inline]
    fn is_second_node_leaf(&self, b: usize) -> bool {
        self.mesh.node(b).is_leaf()
    }

    #[inline]
    fn second_children(&self, b: usize) -> (usize, usize) {
        self.mesh.node(b).children()
    }

    fn bv_testing(&mut self, b1: usize, b2: usize) -> Real {
        self.state.num_bv_tests += 1;
        // Both witnesses come back in the mesh frame, mesh side first.
        let (d, p2, p1) = BV::distance_oriented(&self.pos21, self.mesh.bv(b2), &self.shape_bv);

        self.state.stack.push(ConservativeAdvancementStackData {
            p1: self.pos2 * p1,
            p2: self.pos2 * p2,
            c1: b1,
            c2: b2,
            d,
        });

        d
    }

    fn leaf_testing(&mut self, _: usize, b2: usize) {
        mesh_shape_conservative_advancement_oriented_leaf_testing(
            self.mesh,
            &self.pos2,
            self.motion2,
            self.shape,
            &self.pos1,
            self.motion1,
            &self.shape_sphere,
            self.solver,
            b2,
            &mut self.state,
        )
    }

    fn can_stop(&mut self, c: Real) -> bool {
        mesh_shape_conservative_advancement_oriented_can_stop(
            self.mesh,
            self.motion2,
            &self.shape_sphere,
            self.motion1,
            c,
            &mut self.state,
        )
    }

    #[inline]
    fn swap_last_bv_tests(&mut self) {
        self.state.swap_last_two_entries();
    }
}
