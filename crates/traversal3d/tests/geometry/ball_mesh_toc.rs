use crate::common::grid;
use traversal3d::bounding_volume::{Aabb, BoundingVolume, ObbRss, OrientedBvDistance, Rss};
use traversal3d::math::{Isometry, Real, Vector};
use traversal3d::motion::{InterpolatedMotion, Motion};
use traversal3d::partitioning::{MeshWorkingCopy, RefitStrategy};
use traversal3d::query::{
    shape_mesh_conservative_advancement, shape_mesh_conservative_advancement_oriented,
    ContinuousCollisionRequest, ContinuousCollisionResult, DefaultNarrowPhaseSolver,
};
use traversal3d::shape::Ball;

const RADIUS: Real = 0.5;
const HEIGHT: Real = 3.0;

fn request() -> ContinuousCollisionRequest {
    ContinuousCollisionRequest {
        max_iterations: 100,
        ..ContinuousCollisionRequest::default()
    }
}

fn falling_ball() -> InterpolatedMotion {
    InterpolatedMotion::translation(
        Isometry::translation(0.1, -0.2, HEIGHT),
        Vector::new(0.2, 0.1, -4.0),
    )
}

fn rising_mesh() -> InterpolatedMotion {
    InterpolatedMotion::translation(Isometry::identity(), Vector::new(0.0, 0.0, 2.0))
}

fn check_toc(result: &ContinuousCollisionResult, expected: Real) {
    assert!(result.is_collide);
    assert!(
        result.time_of_contact <= expected + 1.0e-4,
        "{} > {}",
        result.time_of_contact,
        expected
    );
    assert_relative_eq!(result.time_of_contact, expected, epsilon = 1.0e-2);
    assert!(result.min_distance <= 1.0e-2);
}

fn aabb_toc(
    motion2: &mut dyn Motion,
    refit: RefitStrategy,
) -> ContinuousCollisionResult {
    let mut mesh = MeshWorkingCopy::new(&grid::<Aabb>(6, 0.5));
    let request = ContinuousCollisionRequest {
        refit,
        ..request()
    };

    shape_mesh_conservative_advancement(
        &DefaultNarrowPhaseSolver,
        &Ball::new(RADIUS),
        &mut falling_ball(),
        &mut mesh,
        motion2,
        &request,
    )
    .unwrap()
}

fn oriented_toc<BV: BoundingVolume + OrientedBvDistance>(
    motion2: &mut dyn Motion,
) -> ContinuousCollisionResult {
    shape_mesh_conservative_advancement_oriented(
        &DefaultNarrowPhaseSolver,
        &Ball::new(RADIUS),
        &mut falling_ball(),
        &grid::<BV>(6, 0.5),
        motion2,
        &request(),
    )
    .unwrap()
}

#[test]
fn ball_falling_on_a_still_mesh() {
    let expected = (HEIGHT - RADIUS) / 4.0;
    let mut still: Isometry<Real> = Isometry::identity();

    let result = aabb_toc(&mut still, RefitStrategy::Rebuild);
    check_toc(&result, expected);
    assert_relative_eq!(
        result.contact_pos1.translation.vector.z,
        RADIUS,
        epsilon = 5.0e-2
    );
    assert!(result.last_triangle.is_some());

    check_toc(&oriented_toc::<Rss>(&mut still), expected);
    check_toc(&oriented_toc::<ObbRss>(&mut still), expected);
}

#[test]
fn ball_falling_on_a_rising_mesh() {
    let expected = (HEIGHT - RADIUS) / 6.0;

    let result = aabb_toc(&mut rising_mesh(), RefitStrategy::Rebuild);
    check_toc(&result, expected);

    let gap = result.contact_pos1.translation.vector.z - result.contact_pos2.translation.vector.z;
    assert_relative_eq!(gap, RADIUS, epsilon = 5.0e-2);

    check_toc(&oriented_toc::<Rss>(&mut rising_mesh()), expected);
    check_toc(&oriented_toc::<ObbRss>(&mut rising_mesh()), expected);
}

#[test]
fn refit_strategies_agree() {
    let rebuilt = aabb_toc(&mut rising_mesh(), RefitStrategy::Rebuild);
    let top_down = aabb_toc(&mut rising_mesh(), RefitStrategy::TopDown);
    let bottom_up = aabb_toc(&mut rising_mesh(), RefitStrategy::BottomUp);

    for result in [&top_down, &bottom_up] {
        assert_eq!(result.is_collide, rebuilt.is_collide);
        assert_relative_eq!(
            result.time_of_contact,
            rebuilt.time_of_contact,
            epsilon = 1.0e-4
        );
        assert_relative_eq!(result.min_distance, rebuilt.min_distance, epsilon = 1.0e-4);
    }
}

#[test]
fn ball_missing_the_mesh() {
    let mut motion1 = InterpolatedMotion::translation(
        Isometry::translation(-4.0, 0.0, 1.0),
        Vector::new(8.0, 0.0, 0.0),
    );
    let mut still: Isometry<Real> = Isometry::identity();

    let result = shape_mesh_conservative_advancement_oriented(
        &DefaultNarrowPhaseSolver,
        &Ball::new(RADIUS),
        &mut motion1,
        &grid::<Rss>(6, 0.5),
        &mut still,
        &request(),
    )
    .unwrap();

    assert!(!result.is_collide);
    assert_eq!(result.time_of_contact, 1.0);
    assert_relative_eq!(
        motion1.current_transform().translation.vector.x,
        4.0,
        epsilon = 1.0e-5
    );
}
