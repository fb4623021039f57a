use crate::common::{
    assert_non_increasing, brute_force_distance, bumpy_grid, Recorder, WithState,
};
use traversal3d::bounding_volume::{Aabb, ObbRss, Rss};
use traversal3d::math::{Isometry, Point, Real, Vector};
use traversal3d::motion::{InterpolatedMotion, Motion};
use traversal3d::partitioning::{
    distance_recurse, DistanceTraversalNode, MeshWorkingCopy, RefitStrategy,
};
use traversal3d::query::{
    ConservativeAdvancementState, DefaultNarrowPhaseSolver,
    ShapeMeshConservativeAdvancementNodeAabb, ShapeMeshConservativeAdvancementNodeObbRss,
    ShapeMeshConservativeAdvancementNodeRss,
};
use traversal3d::shape::{Ball, Capsule, Shape};

fn heights(i: u32, j: u32) -> Real {
    ((i * 5 + j * 11) % 7) as Real * 0.05
}

fn check_pass<N: DistanceTraversalNode + WithState>(
    recorder: &Recorder<N>,
    expected: Real,
) {
    let state = recorder.node.state();

    assert_eq!(recorder.num_bv_tests, recorder.num_can_stops);
    assert_eq!(recorder.num_bv_tests, state.num_bv_tests);
    assert!(state.stack.is_empty());

    assert_non_increasing(&recorder.min_distances);
    assert_non_increasing(&recorder.delta_ts);
    assert!(recorder
        .delta_ts
        .iter()
        .all(|dt| (0.0..=1.0).contains(dt)));

    assert_relative_eq!(state.min_distance, expected, epsilon = 1.0e-4);
}

fn random_motion(rng: &mut oorandom::Rand32) -> InterpolatedMotion {
    let mut rand = || rng.rand_float() as Real * 2.0 - 1.0;
    let start = Isometry::new(
        Vector::new(rand(), rand(), 1.5 + rand() * 0.5),
        Vector::new(rand(), rand(), rand()),
    );
    InterpolatedMotion::new(
        start,
        Point::origin(),
        Vector::new(rand(), rand(), -2.0 + rand()),
        Vector::new(rand(), rand(), rand()),
    )
}

#[test]
fn traversal_passes_keep_their_invariants() {
    let mut rng = oorandom::Rand32::new(7);
    let aabb_mesh = bumpy_grid::<Aabb>(6, 0.5, heights);
    let rss_mesh = bumpy_grid::<Rss>(6, 0.5, heights);
    let obbrss_mesh = bumpy_grid::<ObbRss>(6, 0.5, heights);
    let mut working = MeshWorkingCopy::new(&aabb_mesh);
    let ball = Ball::new(0.3);
    let capsule = Capsule::new_x(0.4, 0.2);
    let shapes: [&dyn Shape; 2] = [&ball, &capsule];

    for i in 0..50 {
        let shape = shapes[i % 2];
        let motion1 = random_motion(&mut rng);
        let motion2 = InterpolatedMotion::translation(
            Isometry::rotation(Vector::new(0.0, 0.0, 0.2)),
            Vector::new(0.0, 0.0, 0.5),
        );
        let pos1 = motion1.current_transform();
        let pos2 = motion2.current_transform();
        let expected = brute_force_distance(shape, &pos1, &aabb_mesh, &pos2);

        let mut state = ConservativeAdvancementState::default();
        state.begin_pass();
        let node = ShapeMeshConservativeAdvancementNodeAabb::new(
            shape,
            pos1,
            &mut working,
            pos2,
            &DefaultNarrowPhaseSolver,
            &motion1,
            &motion2,
            RefitStrategy::Rebuild,
            state.clone(),
        )
        .unwrap();
        let mut recorder = Recorder::new(node);
        distance_recurse(&mut recorder, 0, 0);
        check_pass(&recorder, expected);

        let node = ShapeMeshConservativeAdvancementNodeRss::new(
            shape,
            pos1,
            &rss_mesh,
            pos2,
            &DefaultNarrowPhaseSolver,
            &motion1,
            &motion2,
            state.clone(),
        )
        .unwrap();
        let mut recorder = Recorder::new(node);
        distance_recurse(&mut recorder, 0, 0);
        check_pass(&recorder, expected);

        let node = ShapeMeshConservativeAdvancementNodeObbRss::new(
            shape,
            pos1,
            &obbrss_mesh,
            pos2,
            &DefaultNarrowPhaseSolver,
            &motion1,
            &motion2,
            state,
        )
        .unwrap();
        let mut recorder = Recorder::new(node);
        distance_recurse(&mut recorder, 0, 0);
        check_pass(&recorder, expected);
    }
}

#[test]
fn overlapping_rotating_ball_cannot_advance() {
    let mesh = bumpy_grid::<Rss>(4, 0.5, |_, _| 0.0);
    let motion1 = InterpolatedMotion::new(
        Isometry::translation(0.1, 0.1, 0.2),
        Point::new(0.5, 0.0, 0.0),
        Vector::zeros(),
        Vector::new(0.0, 0.0, 1.0),
    );
    let motion2: Isometry<Real> = Isometry::identity();
    let ball = Ball::new(0.5);

    let mut state = ConservativeAdvancementState::default();
    state.begin_pass();
    let mut node = ShapeMeshConservativeAdvancementNodeRss::new(
        &ball,
        motion1.current_transform(),
        &mesh,
        motion2,
        &DefaultNarrowPhaseSolver,
        &motion1,
        &motion2,
        state,
    )
    .unwrap();
    distance_recurse(&mut node, 0, 0);

    assert_eq!(node.state().min_distance, 0.0);
    assert_eq!(node.state().delta_t, 0.0);
    assert!(node.state().stack.is_empty());
}
