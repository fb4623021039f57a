use crate::common::FixedContactsSolver;
use traversal3d::math::{Isometry, Real};
use traversal3d::query::{collide, CollisionRequest, CollisionResult};
use traversal3d::shape::{Ball, CollisionGeometry, GeometryId};

fn kept_depths(depths: Vec<Real>, request: &CollisionRequest, result: &mut CollisionResult) -> Vec<Real> {
    let ball = Ball::new(1.0);
    let g1 = CollisionGeometry::new(GeometryId(10), &ball, Isometry::identity());
    let g2 = CollisionGeometry::new(GeometryId(20), &ball, Isometry::translation(0.5, 0.0, 0.0));
    let solver = FixedContactsSolver { depths };

    let _ = collide(&solver, &g1, &g2, request, result).unwrap();

    let mut kept: Vec<_> = result
        .contacts()
        .iter()
        .map(|c| c.penetration_depth)
        .collect();
    kept.sort_by(|a, b| b.total_cmp(a));
    kept
}

#[test]
fn deepest_contacts_survive_truncation() {
    let request = CollisionRequest {
        num_max_contacts: 2,
        enable_contact: true,
        ..CollisionRequest::default()
    };
    let mut result = CollisionResult::new();

    let kept = kept_depths(vec![0.1, 0.5, 0.3, 0.9, 0.2], &request, &mut result);

    assert_eq!(kept, vec![0.9, 0.5]);
    for contact in result.contacts() {
        assert_eq!(contact.geometry1, GeometryId(10));
        assert_eq!(contact.geometry2, GeometryId(20));
    }
}

#[test]
fn truncation_accounts_for_existing_contacts() {
    let request = CollisionRequest {
        num_max_contacts: 3,
        enable_contact: true,
        ..CollisionRequest::default()
    };
    let mut result = CollisionResult::new();

    let _ = kept_depths(vec![0.05], &request, &mut result);
    let kept = kept_depths(vec![0.1, 0.5, 0.3, 0.9, 0.2], &request, &mut result);
    assert_eq!(kept, vec![0.9, 0.5, 0.05]);

    // The result is now full.
    let kept = kept_depths(vec![2.0], &request, &mut result);
    assert_eq!(kept.len(), 3);
    assert!(!kept.contains(&2.0));
}

#[test]
fn random_truncations_keep_the_deepest_set() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..200 {
        let num_contacts = 1 + rng.rand_range(0..20) as usize;
        let capacity = 1 + rng.rand_range(0..20) as usize;
        let depths: Vec<Real> = (0..num_contacts)
            .map(|_| rng.rand_float() as Real)
            .collect();
        let request = CollisionRequest {
            num_max_contacts: capacity,
            enable_contact: true,
            ..CollisionRequest::default()
        };

        let mut expected = depths.clone();
        expected.sort_by(|a, b| b.total_cmp(a));
        expected.truncate(capacity);

        let kept = kept_depths(depths, &request, &mut CollisionResult::new());
        assert_eq!(kept, expected);
    }
}

#[test]
fn boolean_collisions_add_a_single_flag() {
    let request = CollisionRequest {
        num_max_contacts: 4,
        ..CollisionRequest::default()
    };
    let mut result = CollisionResult::new();

    let kept = kept_depths(vec![0.1, 0.5, 0.3], &request, &mut result);

    assert_eq!(kept, vec![0.0]);
    assert!(result.is_collision());
}
