use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume, BvDistance};
use crate::math::{Isometry, Real};
use crate::motion::Motion;
use crate::partitioning::{DistanceTraversalNode, MeshWorkingCopy, RefitStrategy};
use crate::query::conservative_advancement::mesh_shape_conservative_advancement::{
    can_stop_with_bounds, update_with_leaf,
};
use crate::query::conservative_advancement::{
    ConservativeAdvancementStackData, ConservativeAdvancementState,
};
use crate::query::{NarrowPhaseSolver, Unsupported};
use crate::shape::Shape;

/// One conservative-advancement pass between a shape and a triangle mesh.
///
/// All the bounding-volume tests happen in the local frame of the shape at `pos1`, so the
/// mesh must be moved into that frame first: the node places the working copy of the mesh
/// there and refits its hierarchy when it is created. The pristine mesh is never mutated.
pub struct ShapeMeshConservativeAdvancementNode<'a, BV, D: ?Sized> {
    shape: &'a dyn Shape,
    pos1: Isometry<Real>,
    mesh: &'a MeshWorkingCopy<BV>,
    pos2: Isometry<Real>,
    solver: &'a D,
    motion1: &'a dyn Motion,
    motion2: &'a dyn Motion,
    shape_bv: BV,
    shape_sphere: BoundingSphere,
    state: ConservativeAdvancementState,
}

/// Conservative advancement node between a shape and a mesh with an AABB hierarchy.
pub type ShapeMeshConservativeAdvancementNodeAabb<'a, D> =
    ShapeMeshConservativeAdvancementNode<'a, Aabb, D>;

impl<'a, BV, D> ShapeMeshConservativeAdvancementNode<'a, BV, D>
where
    BV: BoundingVolume + BvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    /// Prepares a pass between `shape` at `pos1` and the mesh at `pos2`.
    ///
    /// Fails, without touching `working_mesh`, if `solver` cannot compute the distance between
    /// `shape` and a triangle.
    pub fn new(
        shape: &'a dyn Shape,
        pos1: Isometry<Real>,
        working_mesh: &'a mut MeshWorkingCopy<BV>,
        pos2: Isometry<Real>,
        solver: &'a D,
        motion1: &'a dyn Motion,
        motion2: &'a dyn Motion,
        refit: RefitStrategy,
        state: ConservativeAdvancementState,
    ) -> Result<Self, Unsupported> {
        if !solver.supports_triangle_distance(shape) {
            return Err(Unsupported);
        }

        working_mesh.place(&pos1.inv_mul(&pos2), refit);
        let shape_bv = BV::from_aabb(&shape.compute_local_aabb());
        let shape_sphere = shape_bv.bounding_sphere();

        Ok(Self {
            shape,
            pos1,
            mesh: working_mesh,
            pos2,
            solver,
            motion1,
            motion2,
            shape_bv,
            shape_sphere,
            state,
        })
    }

    /// The bounding volume of the shape, in its local frame.
    #[inline]
    pub fn shape_bv(&self) -> &BV {
        &self.shape_bv
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

impl<BV, D> DistanceTraversalNode for ShapeMeshConservativeAdvancementNode<'_, BV, D>
where
    BV: BoundingVolume + BvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    #[inline]
    fn is_second_node_leaf(&self, b: usize) -> bool {
        self.mesh.model().node(b).is_leaf()
    }

    #[inline]
    fn second_children(&self, b: usize) -> (usize, usize) {
        self.mesh.model().node(b).children()
    }

    fn bv_testing(&mut self, b1: usize, b2: usize) -> Real {
        self.state.num_bv_tests += 1;
        let (d, p1, p2) = self.shape_bv.distance(self.mesh.model().bv(b2));

        self.state.stack.push(ConservativeAdvancementStackData {
            p1: self.pos1 * p1,
            p2: self.pos1 * p2,
            c1: b1,
            c2: b2,
            d,
        });

        d
    }

    fn leaf_testing(&mut self, _: usize, b2: usize) {
        let mesh = self.mesh;
        let triangle_id = mesh.model().leaf_triangle_id(b2);
        let triangle = mesh.model().triangle(triangle_id);

        match self
            .solver
            .shape_triangle_distance(self.shape, &Isometry::identity(), &triangle)
        {
            Ok((d, p1, p2)) => update_with_leaf(
                &mut self.state,
                d,
                self.pos1 * p1,
                self.pos1 * p2,
                triangle_id,
                self.motion1,
                &self.shape_sphere,
                self.motion2,
                &mesh.local_triangle(triangle_id),
            ),
            Err(_) => log::warn!(
                "no triangle distance algorithm for {:?}",
                self.shape.shape_type()
            ),
        }
    }

    fn can_stop(&mut self, c: Real) -> bool {
        let mesh = self.mesh;
        // Maps the frame of the shape, where the mesh volumes live, to the mesh's own frame.
        let pos21 = self.pos2.inv_mul(&self.pos1);

        can_stop_with_bounds(
            &mut self.state,
            c,
            self.motion1,
            &self.shape_sphere,
            self.motion2,
            |c2| mesh.model().bv(c2).bounding_sphere().transform_by(&pos21),
        )
    }

    #[inline]
    fn swap_last_bv_tests(&mut self) {
        self.state.swap_last_two_entries();
    }
}
