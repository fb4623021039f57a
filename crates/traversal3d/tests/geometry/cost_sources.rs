use traversal3d::math::{Isometry, Real, Vector};
use traversal3d::query::{collide, CollisionRequest, CollisionResult, DefaultNarrowPhaseSolver};
use traversal3d::shape::{CollisionGeometry, Cuboid, GeometryId, Occupancy};

#[test]
fn cost_sources_never_exceed_capacity() {
    let mut rng = oorandom::Rand32::new(1234);
    let request = CollisionRequest {
        num_max_cost_sources: 5,
        enable_cost: true,
        num_max_contacts: 1000,
        ..CollisionRequest::default()
    };
    let mut result = CollisionResult::new();
    let mut all_costs = vec![];

    for i in 0..100 {
        let mut rand = || rng.rand_float() as Real;
        let c1 = Cuboid::new(Vector::new(0.2 + rand(), 0.2 + rand(), 0.2 + rand()));
        let c2 = Cuboid::new(Vector::new(0.2 + rand(), 0.2 + rand(), 0.2 + rand()));
        let pos1 = Isometry::translation(rand(), rand(), rand());
        let pos2 = Isometry::translation(rand(), rand(), rand());
        let g1 = CollisionGeometry::new(GeometryId(2 * i), &c1, pos1);
        let g2 = CollisionGeometry::new(GeometryId(2 * i + 1), &c2, pos2);

        if let Some(overlap) = g1.compute_aabb().intersection(&g2.compute_aabb()) {
            all_costs.push(overlap.volume());
        }

        let _ = collide(&DefaultNarrowPhaseSolver, &g1, &g2, &request, &mut result).unwrap();
        assert!(result.num_cost_sources() <= request.num_max_cost_sources);
    }

    all_costs.sort_by(|a, b| b.total_cmp(a));
    let kept: Vec<_> = result.cost_sources().map(|s| s.total_cost).collect();

    assert_eq!(kept.len(), 5);
    for (kept, expected) in kept.iter().zip(all_costs.iter()) {
        assert_relative_eq!(*kept, *expected, epsilon = 1.0e-5);
    }
}

#[test]
fn cost_density_is_the_product_of_both_densities() {
    let cuboid = Cuboid::new(Vector::repeat(1.0));
    let g1 = CollisionGeometry::new(GeometryId(0), &cuboid, Isometry::identity())
        .with_occupancy(Occupancy::with_cost_density(2.0));
    let g2 = CollisionGeometry::new(GeometryId(1), &cuboid, Isometry::translation(1.5, 0.0, 0.0))
        .with_occupancy(Occupancy::with_cost_density(3.0));
    let request = CollisionRequest {
        enable_cost: true,
        ..CollisionRequest::default()
    };
    let mut result = CollisionResult::new();

    assert_eq!(
        collide(&DefaultNarrowPhaseSolver, &g1, &g2, &request, &mut result),
        Ok(1)
    );

    let source = result.cost_sources().next().unwrap();
    assert_relative_eq!(source.cost_density, 6.0);
    // The overlap is a 0.5 x 2 x 2 box.
    assert_relative_eq!(source.total_cost, 12.0, epsilon = 1.0e-5);
}
