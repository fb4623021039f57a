//! Application of the Separating-Axis-Theorem (SAT) to pairs of cuboids.

use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::shape::Cuboid;

/// The support point of `cuboid` along `dir`, both in the cuboid's local frame.
#[inline]
pub fn cuboid_local_support_point(cuboid: &Cuboid, dir: &Vector<Real>) -> Point<Real> {
    Point::from(cuboid.half_extents.zip_map(dir, |he, d| he.copysign(d)))
}

/// Computes the separation distance between two cuboids along a given axis.
///
/// The axis is expressed in the local frame of `cuboid1` and is re-oriented so it points
/// toward `cuboid2`. Returns the signed separation (negative when overlapping) and the oriented
/// axis.
pub fn cuboid_cuboid_compute_separation_wrt_local_line(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
    axis1: &Vector<Real>,
) -> (Real, Vector<Real>) {
    let signum = (1.0 as Real).copysign(pos12.translation.vector.dot(axis1));
    let axis1 = axis1 * signum;
    let axis2 = pos12.inverse_transform_vector(&-axis1);
    let local_pt1 = cuboid_local_support_point(cuboid1, &axis1);
    let local_pt2 = cuboid_local_support_point(cuboid2, &axis2);
    let pt2 = pos12 * local_pt2;
    let separation = (pt2 - local_pt1).dot(&axis1);
    (separation, axis1)
}

/// Finds the best separating axis among the cross products of the edges of both cuboids.
pub fn cuboid_cuboid_find_local_separating_edge_twoway(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
) -> (Real, Vector<Real>) {
    let mut best_separation = -Real::MAX;
    let mut best_dir = Vector::zeros();

    let x2 = pos12 * Vector::x();
    let y2 = pos12 * Vector::y();
    let z2 = pos12 * Vector::z();

    // We have 3 * 3 = 9 axes to test.
    let axes = [
        Vector::new(0.0, -x2.z, x2.y),
        Vector::new(x2.z, 0.0, -x2.x),
        Vector::new(-x2.y, x2.x, 0.0),
        Vector::new(0.0, -y2.z, y2.y),
        Vector::new(y2.z, 0.0, -y2.x),
        Vector::new(-y2.y, y2.x, 0.0),
        Vector::new(0.0, -z2.z, z2.y),
        Vector::new(z2.z, 0.0, -z2.x),
        Vector::new(-z2.y, z2.x, 0.0),
    ];

    for axis1 in &axes {
        let norm1 = axis1.norm();
        if norm1 > crate::math::DEFAULT_EPSILON {
            let (separation, axis1) = cuboid_cuboid_compute_separation_wrt_local_line(
                cuboid1,
                cuboid2,
                pos12,
                &(axis1 / norm1),
            );

            if separation > best_separation {
                best_separation = separation;
                best_dir = axis1;
            }
        }
    }

    (best_separation, best_dir)
}

/// Finds the best separating axis among the face normals of `cuboid1`.
pub fn cuboid_cuboid_find_local_separating_normal_oneway(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
) -> (Real, Vector<Real>) {
    let mut best_separation = -Real::MAX;
    let mut best_dir = Vector::zeros();

    for i in 0..DIM {
        let sign = (1.0 as Real).copysign(pos12.translation.vector[i]);
        let axis1 = Vector::ith(i, sign);
        let axis2 = pos12.inverse_transform_vector(&-axis1);
        let local_pt2 = cuboid_local_support_point(cuboid2, &axis2);
        let pt2 = pos12 * local_pt2;
        let separation = pt2[i] * sign - cuboid1.half_extents[i];

        if separation > best_separation {
            best_separation = separation;
            best_dir = axis1;
        }
    }

    (best_separation, best_dir)
}

/// Finds the axis of largest separation between two cuboids, among all the candidate axes.
///
/// The returned axis is expressed in the local frame of `cuboid1` and points toward
/// `cuboid2`. The cuboids overlap if and only if the returned separation is not positive.
pub fn cuboid_cuboid_find_local_separating_axis(
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    pos12: &Isometry<Real>,
) -> (Real, Vector<Real>) {
    let pos21 = pos12.inverse();
    let (sep1, axis1) = cuboid_cuboid_find_local_separating_normal_oneway(cuboid1, cuboid2, pos12);
    let (sep2, axis2) = cuboid_cuboid_find_local_separating_normal_oneway(cuboid2, cuboid1, &pos21);
    let (sep3, axis3) = cuboid_cuboid_find_local_separating_edge_twoway(cuboid1, cuboid2, pos12);

    let mut best = (sep1, axis1);

    if sep2 > best.0 {
        best = (sep2, pos12 * -axis2);
    }

    if sep3 > best.0 {
        best = (sep3, axis3);
    }

    best
}

#[cfg(test)]
mod test {
    use super::cuboid_cuboid_find_local_separating_axis;
    use crate::math::{Isometry, Vector};
    use crate::shape::Cuboid;

    #[test]
    fn separated_and_overlapping_cuboids() {
        let c = Cuboid::new(Vector::new(1.0, 1.0, 1.0));

        let (sep, axis) =
            cuboid_cuboid_find_local_separating_axis(&c, &c, &Isometry::translation(3.0, 0.0, 0.0));
        assert_relative_eq!(sep, 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(axis, Vector::x(), epsilon = 1.0e-5);

        let (sep, axis) = cuboid_cuboid_find_local_separating_axis(
            &c,
            &c,
            &Isometry::translation(0.0, -1.5, 0.2),
        );
        assert_relative_eq!(sep, -0.5, epsilon = 1.0e-5);
        assert_relative_eq!(axis, -Vector::y(), epsilon = 1.0e-5);
    }
}
