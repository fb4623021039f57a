//! Leaf and pruning logic shared by all the shape-vs-mesh conservative advancement nodes.

use crate::bounding_volume::{BoundingSphere, BoundingVolume};
use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::motion::Motion;
use crate::partitioning::BvhModel;
use crate::query::conservative_advancement::ConservativeAdvancementState;
use crate::query::NarrowPhaseSolver;
use crate::shape::{Shape, Triangle};

#[inline]
fn direction(from: &Point<Real>, to: &Point<Real>) -> Vector<Real> {
    (to - from)
        .try_normalize(DEFAULT_EPSILON)
        .unwrap_or_else(Vector::zeros)
}

/// Records the distance `d` between the shape and the triangle `triangle_id`, then tightens
/// `delta_t` with the motion bounds of both along the direction joining their witnesses.
///
/// `p_shape` and `p_mesh` are world-space; `shape_sphere` and `local_triangle` are expressed
/// in the local frames of `motion1` and `motion2` respectively.
pub(crate) fn update_with_leaf(
    state: &mut ConservativeAdvancementState,
    d: Real,
    p_shape: Point<Real>,
    p_mesh: Point<Real>,
    triangle_id: u32,
    motion1: &dyn Motion,
    shape_sphere: &BoundingSphere,
    motion2: &dyn Motion,
    local_triangle: &Triangle,
) {
    state.num_leaf_tests += 1;

    if d < state.min_distance {
        state.min_distance = d;
        state.closest_p1 = p_shape;
        state.closest_p2 = p_mesh;
        state.last_triangle = Some(triangle_id);
    }

    let n = direction(&p_shape, &p_mesh);
    let bound = motion1.sphere_motion_bound(shape_sphere, &n)
        + motion2.triangle_motion_bound(local_triangle, &-n);

    let cur_delta_t = if bound <= d { 1.0 } else { d / bound };
    state.tighten_delta_t(cur_delta_t);
}

/// Pops the most recent stack entry and decides whether its subtree, at distance `c`, can be
/// skipped.
///
/// When it can, `delta_t` is tightened with the motion bounds of the two bounding volumes of
/// the entry. `mesh_sphere` gives the bounding sphere of a mesh node in the local frame of
/// `motion2`.
pub(crate) fn can_stop_with_bounds(
    state: &mut ConservativeAdvancementState,
    c: Real,
    motion1: &dyn Motion,
    shape_sphere: &BoundingSphere,
    motion2: &dyn Motion,
    mesh_sphere: impl FnOnce(usize) -> BoundingSphere,
) -> bool {
    let entry = state.stack.pop();
    debug_assert!(entry.is_some(), "unbalanced conservative advancement stack");

    if !state.is_prunable(c) {
        return false;
    }

    if let Some(entry) = entry {
        let n = direction(&entry.p1, &entry.p2);
        let bound = motion1.sphere_motion_bound(shape_sphere, &n)
            + motion2.sphere_motion_bound(&mesh_sphere(entry.c2), &-n);

        let cur_delta_t = if bound < c || bound <= 0.0 {
            1.0
        } else {
            c / bound
        };
        state.tighten_delta_t(cur_delta_t);
    }

    true
}

/// Leaf test of the oriented conservative advancement between the leaf `b2` of `mesh` and
/// `shape`.
///
/// The mesh is left in its local frame: its triangle is moved to world-space by `pos2` before
/// calling the narrow-phase solver.
pub fn mesh_shape_conservative_advancement_oriented_leaf_testing<BV, D>(
    mesh: &BvhModel<BV>,
    pos2: &Isometry<Real>,
    motion2: &dyn Motion,
    shape: &dyn Shape,
    pos1: &Isometry<Real>,
    motion1: &dyn Motion,
    shape_sphere: &BoundingSphere,
    solver: &D,
    b2: usize,
    state: &mut ConservativeAdvancementState,
) where
    BV: BoundingVolume,
    D: NarrowPhaseSolver + ?Sized,
{
    let triangle_id = mesh.leaf_triangle_id(b2);
    let local_triangle = mesh.triangle(triangle_id);
    let triangle = local_triangle.transformed(pos2);

    match solver.shape_triangle_distance(shape, pos1, &triangle) {
        Ok((d, p_shape, p_mesh)) => update_with_leaf(
            state,
            d,
            p_shape,
            p_mesh,
            triangle_id,
            motion1,
            shape_sphere,
            motion2,
            &local_triangle,
        ),
        Err(_) => log::warn!(
            "no triangle distance algorithm for {:?}",
            shape.shape_type()
        ),
    }
}

/// Pruning test of the oriented conservative advancement.
///
/// The bounding volumes of `mesh` are expressed in its local frame, which is the frame
/// `motion2` bounds displacements in.
pub fn mesh_shape_conservative_advancement_oriented_can_stop<BV: BoundingVolume>(
    mesh: &BvhModel<BV>,
    motion2: &dyn Motion,
    shape_sphere: &BoundingSphere,
    motion1: &dyn Motion,
    c: Real,
    state: &mut ConservativeAdvancementState,
) -> bool {
    can_stop_with_bounds(state, c, motion1, shape_sphere, motion2, |c2| {
        mesh.bv(c2).bounding_sphere()
    })
}

#[cfg(test)]
mod test {
    use super::{can_stop_with_bounds, update_with_leaf};
    use crate::bounding_volume::BoundingSphere;
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::motion::InterpolatedMotion;
    use crate::query::conservative_advancement::{
        ConservativeAdvancementStackData, ConservativeAdvancementState,
    };
    use crate::shape::Triangle;

    fn fixed() -> Isometry<Real> {
        Isometry::identity()
    }

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point::new(-1.0, -1.0, 0.0),
            Point::new(1.0, -1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn leaf_step_is_distance_over_bound() {
        let mut state = ConservativeAdvancementState::default();
        // Moving down at speed 4 toward a static triangle 2 units below.
        let motion1 = InterpolatedMotion::translation(
            Isometry::translation(0.0, 0.0, 2.5),
            Vector::new(0.0, 0.0, -4.0),
        );
        let sphere = BoundingSphere::new(Point::origin(), 0.5);

        update_with_leaf(
            &mut state,
            2.0,
            Point::new(0.0, 0.0, 2.0),
            Point::origin(),
            3,
            &motion1,
            &sphere,
            &fixed(),
            &unit_triangle(),
        );

        assert_eq!(state.min_distance, 2.0);
        assert_eq!(state.last_triangle, Some(3));
        assert_relative_eq!(state.delta_t, 0.5);

        // Ties do not replace the closest triangle.
        update_with_leaf(
            &mut state,
            2.0,
            Point::new(0.0, 0.0, 2.0),
            Point::origin(),
            4,
            &motion1,
            &sphere,
            &fixed(),
            &unit_triangle(),
        );
        assert_eq!(state.last_triangle, Some(3));
        assert_eq!(state.num_leaf_tests, 2);
    }

    #[test]
    fn static_leaf_does_not_restrict_the_step() {
        let mut state = ConservativeAdvancementState::default();
        update_with_leaf(
            &mut state,
            0.0,
            Point::origin(),
            Point::origin(),
            0,
            &fixed(),
            &BoundingSphere::new(Point::origin(), 1.0),
            &fixed(),
            &unit_triangle(),
        );

        assert_eq!(state.min_distance, 0.0);
        assert_eq!(state.delta_t, 1.0);
    }

    #[test]
    fn stopping_tightens_with_volume_bounds() {
        let motion1 = InterpolatedMotion::translation(
            Isometry::identity(),
            Vector::new(0.0, 0.0, -2.0),
        );
        let sphere = BoundingSphere::new(Point::origin(), 0.5);
        let mut state = ConservativeAdvancementState {
            min_distance: 1.0,
            ..Default::default()
        };
        state.stack.push(ConservativeAdvancementStackData {
            p1: Point::origin(),
            p2: Point::new(0.0, 0.0, -1.5),
            c1: 0,
            c2: 7,
            d: 1.5,
        });

        let stop = can_stop_with_bounds(
            &mut state,
            1.5,
            &motion1,
            &sphere,
            &fixed(),
            |c2| {
                assert_eq!(c2, 7);
                BoundingSphere::new(Point::origin(), 1.0)
            },
        );

        assert!(stop);
        assert!(state.stack.is_empty());
        assert_relative_eq!(state.delta_t, 0.75);
    }

    #[test]
    fn not_stopping_still_pops() {
        let mut state = ConservativeAdvancementState {
            min_distance: 1.0,
            ..Default::default()
        };
        state.stack.push(ConservativeAdvancementStackData {
            p1: Point::origin(),
            p2: Point::new(0.0, 0.0, -0.5),
            c1: 0,
            c2: 1,
            d: 0.5,
        });

        let stop = can_stop_with_bounds(
            &mut state,
            0.5,
            &fixed(),
            &BoundingSphere::new(Point::origin(), 1.0),
            &fixed(),
            |_| BoundingSphere::new(Point::origin(), 1.0),
        );

        assert!(!stop);
        assert!(state.stack.is_empty());
        assert_eq!(state.delta_t, 1.0);
    }
}
