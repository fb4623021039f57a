use crate::bounding_volume::{BoundingVolume, BvDistance, OrientedBvDistance};
use crate::motion::Motion;
use crate::partitioning::{distance_recurse, BvhModel, MeshWorkingCopy};
use crate::query::conservative_advancement::{
    ConservativeAdvancementState, ContinuousCollisionRequest, ContinuousCollisionResult,
    ShapeMeshConservativeAdvancementNode, ShapeMeshOrientedConservativeAdvancementNode,
};
use crate::query::{NarrowPhaseSolver, Unsupported};
use crate::shape::Shape;

/// Advances both motions until a pass reports a contact, the end of the motions is reached,
/// or the iteration limit is reached.
///
/// `run_pass` runs one complete traversal with the motions at their current time.
fn conservative_advancement<F>(
    motion1: &mut dyn Motion,
    motion2: &mut dyn Motion,
    request: &ContinuousCollisionRequest,
    mut run_pass: F,
) -> Result<ContinuousCollisionResult, Unsupported>
where
    F: FnMut(
        &dyn Motion,
        &dyn Motion,
        ConservativeAdvancementState,
    ) -> Result<ConservativeAdvancementState, Unsupported>,
{
    motion1.integrate(0.0);
    motion2.integrate(0.0);

    let mut state = ConservativeAdvancementState::from_request(request);
    let mut is_collide = false;
    let mut num_iterations = 0;

    while num_iterations < request.max_iterations {
        num_iterations += 1;
        state.begin_pass();
        state = run_pass(&*motion1, &*motion2, state)?;

        log::trace!(
            "pass {}: toc = {}, distance = {}, delta_t = {}",
            num_iterations,
            state.toc,
            state.min_distance,
            state.delta_t
        );

        if state.min_distance <= 0.0 || state.delta_t <= state.t_err {
            is_collide = true;
            break;
        }

        state.toc += state.delta_t;

        if state.toc >= 1.0 {
            state.toc = 1.0;
            break;
        }

        motion1.integrate(state.toc);
        motion2.integrate(state.toc);
    }

    motion1.integrate(state.toc);
    motion2.integrate(state.toc);

    log::debug!(
        "conservative advancement: toc = {} after {} passes ({} volume tests, {} leaf tests), collide: {}",
        state.toc,
        num_iterations,
        state.num_bv_tests,
        state.num_leaf_tests,
        is_collide
    );

    Ok(ContinuousCollisionResult {
        is_collide,
        time_of_contact: state.toc,
        contact_pos1: motion1.current_transform(),
        contact_pos2: motion2.current_transform(),
        min_distance: state.min_distance,
        closest_points: (state.closest_p1, state.closest_p2),
        last_triangle: state.last_triangle,
        num_iterations,
    })
}

/// Computes the time of contact between a moving shape and a moving mesh by conservative
/// advancement.
///
/// The mesh is given through a working copy, which is moved into the frame of the shape and
/// refitted with `request.refit` at each pass.
pub fn shape_mesh_conservative_advancement<BV, D>(
    solver: &D,
    shape: &dyn Shape,
    motion1: &mut dyn Motion,
    mesh: &mut MeshWorkingCopy<BV>,
    motion2: &mut dyn Motion,
    request: &ContinuousCollisionRequest,
) -> Result<ContinuousCollisionResult, Unsupported>
where
    BV: BoundingVolume + BvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    conservative_advancement(motion1, motion2, request, |m1, m2, state| {
        let mut node = ShapeMeshConservativeAdvancementNode::new(
            shape,
            m1.current_transform(),
            &mut *mesh,
            m2.current_transform(),
            solver,
            m1,
            m2,
            request.refit,
            state,
        )?;
        distance_recurse(&mut node, 0, 0);
        Ok(node.into_state())
    })
}

/// Computes the time of contact between a moving shape and a moving mesh with an oriented
/// bounding-volume hierarchy, by conservative advancement.
///
/// The mesh is never modified.
pub fn shape_mesh_conservative_advancement_oriented<BV, D>(
    solver: &D,
    shape: &dyn Shape,
    motion1: &mut dyn Motion,
    mesh: &BvhModel<BV>,
    motion2: &mut dyn Motion,
    request: &ContinuousCollisionRequest,
) -> Result<ContinuousCollisionResult, Unsupported>
where
    BV: BoundingVolume + OrientedBvDistance,
    D: NarrowPhaseSolver + ?Sized,
{
    conservative_advancement(motion1, motion2, request, |m1, m2, state| {
        let mut node = ShapeMeshOrientedConservativeAdvancementNode::new(
            shape,
            m1.current_transform(),
            mesh,
            m2.current_transform(),
            solver,
            m1,
            m2,
            state,
        )?;
        distance_recurse(&mut node, 0, 0);
        Ok(node.into_state())
    })
}

#[cfg(test)]
mod test {
    use super::shape_mesh_conservative_advancement;
    use crate::bounding_volume::Aabb;
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::motion::InterpolatedMotion;
    use crate::partitioning::{BvhModel, MeshWorkingCopy};
    use crate::query::conservative_advancement::ContinuousCollisionRequest;
    use crate::query::DefaultNarrowPhaseSolver;
    use crate::shape::Ball;

    fn floor() -> BvhModel<Aabb> {
        let vertices = vec![
            Point::new(-5.0, -5.0, 0.0),
            Point::new(5.0, -5.0, 0.0),
            Point::new(5.0, 5.0, 0.0),
            Point::new(-5.0, 5.0, 0.0),
        ];
        BvhModel::new(vertices, vec![[0, 1, 2], [0, 2, 3]]).unwrap()
    }

    #[test]
    fn falling_ball_hits_the_floor() {
        let mut mesh = MeshWorkingCopy::new(&floor());
        let mut motion1 = InterpolatedMotion::translation(
            Isometry::translation(0.3, -0.2, 3.0),
            Vector::new(0.0, 0.0, -4.0),
        );
        let mut motion2: Isometry<Real> = Isometry::identity();
        let request = ContinuousCollisionRequest {
            max_iterations: 50,
            ..Default::default()
        };

        let result = shape_mesh_conservative_advancement(
            &DefaultNarrowPhaseSolver,
            &Ball::new(1.0),
            &mut motion1,
            &mut mesh,
            &mut motion2,
            &request,
        )
        .unwrap();

        // The ball travels 2 of its 4 units before touching the floor.
        assert!(result.is_collide);
        assert!(result.time_of_contact <= 0.5);
        assert_relative_eq!(result.time_of_contact, 0.5, epsilon = 1.0e-3);
        assert_relative_eq!(
            result.contact_pos1.translation.vector.z,
            1.0,
            epsilon = 1.0e-2
        );
    }

    #[test]
    fn ball_moving_away_never_collides() {
        let mut mesh = MeshWorkingCopy::new(&floor());
        let mut motion1 = InterpolatedMotion::translation(
            Isometry::translation(0.0, 0.0, 2.0),
            Vector::new(1.0, 0.0, 3.0),
        );
        let mut motion2: Isometry<Real> = Isometry::identity();

        let result = shape_mesh_conservative_advancement(
            &DefaultNarrowPhaseSolver,
            &Ball::new(0.5),
            &mut motion1,
            &mut mesh,
            &mut motion2,
            &ContinuousCollisionRequest::default(),
        )
        .unwrap();

        assert!(!result.is_collide);
        assert_eq!(result.time_of_contact, 1.0);
        assert_eq!(result.num_iterations, 1);
        assert_relative_eq!(result.min_distance, 1.5, epsilon = 1.0e-5);
    }
}
