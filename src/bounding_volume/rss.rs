//! Rectangle Swept Sphere.

use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume, BvDistance, OrientedBvDistance};
use crate::math::{Isometry, Point, Real, Translation, Vector};
use crate::query::details::closest_points_segment_segment;
use arrayvec::ArrayVec;

/// A Rectangle Swept Sphere: the set of points at a distance at most `radius` of a
/// rectangle.
///
/// The rectangle lies in the `xy` plane of `pose`, centered at its origin, with the
/// half-lengths `half_lengths[0]` along `x` and `half_lengths[1]` along `y`.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Rss {
    /// The frame of the rectangle.
    pub pose: Isometry<Real>,
    /// The half side lengths of the rectangle.
    pub half_lengths: [Real; 2],
    /// The radius of the sphere swept along the rectangle.
    pub radius: Real,
}

impl Rss {
    /// Creates a new rectangle swept sphere.
    #[inline]
    pub fn new(pose: Isometry<Real>, half_lengths: [Real; 2], radius: Real) -> Self {
        Self {
            pose,
            half_lengths,
            radius,
        }
    }

    /// The four corners of the rectangle, in the frame the volume lives in.
    pub fn rectangle_vertices(&self) -> [Point<Real>; 4] {
        rectangle_corners(&self.half_lengths).map(|pt| self.pose * pt)
    }
}

fn rectangle_corners(half: &[Real; 2]) -> [Point<Real>; 4] {
    [
        Point::new(-half[0], -half[1], 0.0),
        Point::new(half[0], -half[1], 0.0),
        Point::new(half[0], half[1], 0.0),
        Point::new(-half[0], half[1], 0.0),
    ]
}

/// Projects `pt` on the rectangle centered at the origin of the `xy` plane.
#[inline]
fn project_on_rectangle(half: &[Real; 2], pt: &Point<Real>) -> Point<Real> {
    Point::new(
        na::clamp(pt.x, -half[0], half[0]),
        na::clamp(pt.y, -half[1], half[1]),
        0.0,
    )
}

/// Finds, among the edges given by `corners`, one crossing the interior of the rectangle of
/// half-lengths `half` lying in the `xy` plane. Returns the crossing point.
fn edge_crossing_rectangle(half: &[Real; 2], corners: &[Point<Real>; 4]) -> Option<Point<Real>> {
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];

        if a.z * b.z > 0.0 || a.z == b.z {
            continue;
        }

        let t = a.z / (a.z - b.z);
        let hit = a + (b - a) * t;

        if hit.x.abs() <= half[0] && hit.y.abs() <= half[1] {
            return Some(Point::new(hit.x, hit.y, 0.0));
        }
    }

    None
}

/// Exact distance between two rectangles.
///
/// The first rectangle lies in the `xy` plane, centered at the origin, with half-lengths
/// `half1`. The second one has half-lengths `half2` in its own frame, and `pos12` maps its
/// frame into the frame of the first rectangle.
///
/// Returns the distance and a pair of closest points (on the first and the second rectangle
/// respectively), both expressed in the frame of the first rectangle.
pub fn rectangle_rectangle_closest_points(
    pos12: &Isometry<Real>,
    half1: &[Real; 2],
    half2: &[Real; 2],
) -> (Real, Point<Real>, Point<Real>) {
    let corners1 = rectangle_corners(half1);
    let corners2 = rectangle_corners(half2).map(|pt| pos12 * pt);

    // Corners of the first rectangle, expressed in the second rectangle's frame.
    let corners1_2 = corners1.map(|pt| pos12.inverse_transform_point(&pt));

    if let Some(hit) = edge_crossing_rectangle(half1, &corners2) {
        return (0.0, hit, hit);
    }

    if let Some(hit) = edge_crossing_rectangle(half2, &corners1_2) {
        let hit = pos12 * hit;
        return (0.0, hit, hit);
    }

    let mut candidates: ArrayVec<(Point<Real>, Point<Real>), 24> = ArrayVec::new();

    for i in 0..4 {
        let seg1 = (&corners1[i], &corners1[(i + 1) % 4]);
        for j in 0..4 {
            let seg2 = (&corners2[j], &corners2[(j + 1) % 4]);
            candidates.push(closest_points_segment_segment(seg1, seg2));
        }
    }

    for pt in &corners2 {
        candidates.push((project_on_rectangle(half1, pt), *pt));
    }

    for (pt, pt_2) in corners1.iter().zip(corners1_2.iter()) {
        let proj = pos12 * project_on_rectangle(half2, pt_2);
        candidates.push((*pt, proj));
    }

    let mut best = (Real::MAX, Point::origin(), Point::origin());

    for (p1, p2) in candidates {
        let dist = na::distance_squared(&p1, &p2);
        if dist < best.0 {
            best = (dist, p1, p2);
        }
    }

    (best.0.sqrt(), best.1, best.2)
}

impl BoundingVolume for Rss {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.pose.translation.vector.into()
    }

    #[inline]
    fn intersects(&self, other: &Rss) -> bool {
        let pos12 = self.pose.inv_mul(&other.pose);
        let (dist, _, _) =
            rectangle_rectangle_closest_points(&pos12, &self.half_lengths, &other.half_lengths);
        dist <= self.radius + other.radius
    }

    fn merged(&self, other: &Rss) -> Rss {
        let mut pts = [Point::origin(); 8];
        pts[..4].copy_from_slice(&self.rectangle_vertices());
        pts[4..].copy_from_slice(&other.rectangle_vertices());

        let mut res = Rss::from_points(&pts);
        res.radius += self.radius.max(other.radius);
        res
    }

    #[inline]
    fn bounding_sphere(&self) -> BoundingSphere {
        let half_diag = Vector::new(self.half_lengths[0], self.half_lengths[1], 0.0).norm();
        BoundingSphere::new(self.center(), half_diag + self.radius)
    }

    fn from_points(pts: &[Point<Real>]) -> Self {
        // The principal frame sorts its axes by decreasing spread: the rectangle spans the
        // first two and the radius covers the third.
        let (pose, half_extents) = crate::utils::principal_frame(pts);
        Rss::new(pose, [half_extents.x, half_extents.y], half_extents.z)
    }

    fn from_aabb(aabb: &Aabb) -> Self {
        let he = aabb.half_extents();
        let mut axes = [0, 1, 2];
        axes.sort_by(|a, b| he[*b].total_cmp(&he[*a]));

        // Right-handed frame whose first two axes are the two largest AABB extents.
        let x = Vector::ith(axes[0], 1.0);
        let y = Vector::ith(axes[1], 1.0);
        let z = x.cross(&y);
        let rot = crate::math::Rotation::from_rotation_matrix(
            &na::Rotation3::from_matrix_unchecked(na::Matrix3::from_columns(&[x, y, z])),
        );
        let pose = Isometry::from_parts(Translation::from(aabb.center().coords), rot);

        Rss::new(pose, [he[axes[0]], he[axes[1]]], he[axes[2]])
    }
}

impl OrientedBvDistance for Rss {
    fn distance_oriented(
        pos12: &Isometry<Real>,
        bv1: &Rss,
        bv2: &Rss,
    ) -> (Real, Point<Real>, Point<Real>) {
        let rel = bv1.pose.inv_mul(&(pos12 * bv2.pose));
        let (rect_dist, mut p1, mut p2) =
            rectangle_rectangle_closest_points(&rel, &bv1.half_lengths, &bv2.half_lengths);
        let dist = rect_dist - bv1.radius - bv2.radius;

        if dist > 0.0 {
            let dir = (p2 - p1) / rect_dist;
            p1 += dir * bv1.radius;
            p2 -= dir * bv2.radius;
            (dist, bv1.pose * p1, bv1.pose * p2)
        } else {
            (0.0, bv1.pose * p1, bv1.pose * p2)
        }
    }
}

impl BvDistance for Rss {
    #[inline]
    fn distance(&self, other: &Rss) -> (Real, Point<Real>, Point<Real>) {
        Rss::distance_oriented(&Isometry::identity(), self, other)
    }
}
