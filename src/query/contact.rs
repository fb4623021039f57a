//! Contact points between pairs of primitive shapes.
//!
//! All the functions of this module work in the world frame and return normals pointing from
//! the first shape toward the second one.

use crate::math::{Isometry, Point, Real, Vector};
use crate::query::sat;
use crate::shape::{Ball, Capsule, Cuboid};

/// A contact point computed by a narrow-phase solver.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactPoint {
    /// The contact position, in world-space.
    pub pos: Point<Real>,
    /// The contact normal, in world-space, pointing from the first shape toward the second one.
    pub normal: Vector<Real>,
    /// The penetration depth. Non-negative for penetrating shapes.
    pub penetration_depth: Real,
}

impl ContactPoint {
    /// Creates a new contact point.
    #[inline]
    pub fn new(pos: Point<Real>, normal: Vector<Real>, penetration_depth: Real) -> Self {
        Self {
            pos,
            normal,
            penetration_depth,
        }
    }

    /// The same contact seen from the other shape.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Contact between two spheres of centers `center1`, `center2` and radii `radius1`, `radius2`.
///
/// This is the building block of all the round shapes: a capsule is a sphere centered at the
/// point of its segment closest to the other shape.
pub fn contact_sphere_sphere(
    center1: &Point<Real>,
    radius1: Real,
    center2: &Point<Real>,
    radius2: Real,
) -> Option<ContactPoint> {
    let delta = center2 - center1;
    let dist = delta.norm();
    let sum_radius = radius1 + radius2;

    if dist > sum_radius {
        return None;
    }

    let normal = if dist > crate::math::DEFAULT_EPSILON {
        delta / dist
    } else {
        Vector::x()
    };
    let depth = sum_radius - dist;
    let pos = center1 + normal * (radius1 - depth * 0.5);

    Some(ContactPoint::new(pos, normal, depth))
}

/// Contact between two balls.
#[inline]
pub fn contact_ball_ball(
    pos1: &Isometry<Real>,
    b1: &Ball,
    pos2: &Isometry<Real>,
    b2: &Ball,
) -> Option<ContactPoint> {
    let c1 = Point::from(pos1.translation.vector);
    let c2 = Point::from(pos2.translation.vector);
    contact_sphere_sphere(&c1, b1.radius, &c2, b2.radius)
}

/// Contact between a ball and a capsule.
pub fn contact_ball_capsule(
    pos1: &Isometry<Real>,
    b1: &Ball,
    pos2: &Isometry<Real>,
    c2: &Capsule,
) -> Option<ContactPoint> {
    let center1 = Point::from(pos1.translation.vector);
    let seg2 = c2.segment.transformed(pos2);
    let center2 = seg2.project_local_point(&center1);
    contact_sphere_sphere(&center1, b1.radius, &center2, c2.radius)
}

/// Contact between two capsules.
pub fn contact_capsule_capsule(
    pos1: &Isometry<Real>,
    c1: &Capsule,
    pos2: &Isometry<Real>,
    c2: &Capsule,
) -> Option<ContactPoint> {
    let seg1 = c1.segment.transformed(pos1);
    let seg2 = c2.segment.transformed(pos2);
    let (center1, center2) = seg1.closest_points(&seg2);
    contact_sphere_sphere(&center1, c1.radius, &center2, c2.radius)
}

/// Contact between a ball and a cuboid.
pub fn contact_ball_cuboid(
    pos1: &Isometry<Real>,
    b1: &Ball,
    pos2: &Isometry<Real>,
    c2: &Cuboid,
) -> Option<ContactPoint> {
    let center = Point::from(pos1.translation.vector);
    let local_center = pos2.inverse_transform_point(&center);
    let proj = c2.project_local_point(&local_center);

    if proj != local_center {
        // The center is outside of the cuboid.
        let delta = proj - local_center;
        let dist = delta.norm();

        if dist > b1.radius {
            return None;
        }

        let normal = pos2 * (delta / dist);
        let depth = b1.radius - dist;
        return Some(ContactPoint::new(pos2 * proj, normal, depth));
    }

    // The center is inside: push it out through the closest face.
    let (axis, gap) = c2
        .half_extents
        .iter()
        .zip(local_center.iter())
        .map(|(he, x)| he - x.abs())
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, 0.0));
    let outward = Vector::ith(axis, (1.0 as Real).copysign(local_center[axis]));
    let normal = pos2 * -outward;
    let depth = b1.radius + gap;

    Some(ContactPoint::new(center, normal, depth))
}

/// Contact between two cuboids, reduced to a single contact point.
pub fn contact_cuboid_cuboid(
    pos1: &Isometry<Real>,
    c1: &Cuboid,
    pos2: &Isometry<Real>,
    c2: &Cuboid,
) -> Option<ContactPoint> {
    let pos12 = pos1.inv_mul(pos2);
    let (separation, local_axis) = sat::cuboid_cuboid_find_local_separating_axis(c1, c2, &pos12);

    if separation > 0.0 {
        return None;
    }

    let local_pt1 = sat::cuboid_local_support_point(c1, &local_axis);
    let local_pt2 = pos12
        * sat::cuboid_local_support_point(c2, &pos12.inverse_transform_vector(&-local_axis));
    let pos = pos1 * na::center(&local_pt1, &local_pt2);

    Some(ContactPoint::new(pos, pos1 * local_axis, -separation))
}
