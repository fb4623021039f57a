use crate::common::{brute_force_distance, bumpy_grid};
use traversal3d::bounding_volume::{Aabb, ObbRss, Rss};
use traversal3d::math::{Isometry, Real, Vector};
use traversal3d::partitioning::MeshWorkingCopy;
use traversal3d::query::{
    shape_mesh_conservative_advancement, shape_mesh_conservative_advancement_oriented,
    ContinuousCollisionRequest, DefaultNarrowPhaseSolver,
};
use traversal3d::shape::{Ball, Capsule, Shape};

fn heights(i: u32, j: u32) -> Real {
    ((i * 7 + j * 3) % 5) as Real * 0.1
}

fn check_still(shape: &dyn Shape, pos1: Isometry<Real>, pos2: Isometry<Real>) {
    let request = ContinuousCollisionRequest::default();
    let aabb_mesh = bumpy_grid::<Aabb>(6, 0.5, heights);
    let expected = brute_force_distance(shape, &pos1, &aabb_mesh, &pos2);
    assert!(expected > 0.0);

    let (mut motion1, mut motion2) = (pos1, pos2);
    let mut working = MeshWorkingCopy::new(&aabb_mesh);
    let result = shape_mesh_conservative_advancement(
        &DefaultNarrowPhaseSolver,
        shape,
        &mut motion1,
        &mut working,
        &mut motion2,
        &request,
    )
    .unwrap();

    assert!(!result.is_collide);
    assert_eq!(result.time_of_contact, 1.0);
    assert_eq!(result.num_iterations, 1);
    assert_relative_eq!(result.min_distance, expected, epsilon = 1.0e-4);
    assert_relative_eq!(result.contact_pos1, pos1);

    let rss_mesh = bumpy_grid::<Rss>(6, 0.5, heights);
    let (mut motion1, mut motion2) = (pos1, pos2);
    let result = shape_mesh_conservative_advancement_oriented(
        &DefaultNarrowPhaseSolver,
        shape,
        &mut motion1,
        &rss_mesh,
        &mut motion2,
        &request,
    )
    .unwrap();

    assert!(!result.is_collide);
    assert_eq!(result.time_of_contact, 1.0);
    assert_relative_eq!(result.min_distance, expected, epsilon = 1.0e-4);

    let obbrss_mesh = bumpy_grid::<ObbRss>(6, 0.5, heights);
    let (mut motion1, mut motion2) = (pos1, pos2);
    let result = shape_mesh_conservative_advancement_oriented(
        &DefaultNarrowPhaseSolver,
        shape,
        &mut motion1,
        &obbrss_mesh,
        &mut motion2,
        &request,
    )
    .unwrap();

    assert!(!result.is_collide);
    assert_eq!(result.time_of_contact, 1.0);
    assert_relative_eq!(result.min_distance, expected, epsilon = 1.0e-4);
}

#[test]
fn still_ball_reaches_the_end_of_the_motion() {
    check_still(
        &Ball::new(0.3),
        Isometry::translation(0.2, -0.4, 1.5),
        Isometry::identity(),
    );
}

#[test]
fn still_capsule_above_a_rotated_mesh() {
    let pos2 = Isometry::new(Vector::new(0.0, 0.0, -1.0), Vector::new(0.1, -0.2, 0.3));
    check_still(
        &Capsule::new_y(0.8, 0.25),
        Isometry::new(Vector::new(0.5, 0.1, 1.0), Vector::new(0.4, 0.0, 0.0)),
        pos2,
    );
}
