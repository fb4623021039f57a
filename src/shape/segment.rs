//! Definition of the segment shape.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::query::details::closest_points_segment_segment;
use core::mem;

/// A segment shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point<Real>,
    /// The segment second point.
    pub b: Point<Real>,
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The direction of this segment scaled by its length.
    ///
    /// Points from `self.a` toward `self.b`.
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The length of this segment.
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// Swaps the two vertices of this segment.
    pub fn swap(&mut self) {
        mem::swap(&mut self.a, &mut self.b)
    }

    /// The unit direction of this segment.
    ///
    /// Points from `self.a()` toward `self.b()`.
    /// Returns `None` is both points are equal.
    pub fn direction(&self) -> Option<UnitVector<Real>> {
        UnitVector::try_new(self.scaled_direction(), crate::math::DEFAULT_EPSILON)
    }

    /// Applies the isometry `m` to the vertices of this segment and returns the resulting
    /// segment.
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Segment::new(m * self.a, m * self.b)
    }

    /// Computes the AABB of this segment.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(&[self.a, self.b])
    }

    /// Computes the point of this segment closest to `pt`.
    pub fn project_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        let ab = self.scaled_direction();
        let sqnab = ab.norm_squared();

        if sqnab <= crate::math::DEFAULT_EPSILON {
            return self.a;
        }

        let t = na::clamp(ab.dot(&(pt - self.a)) / sqnab, 0.0, 1.0);
        self.a + ab * t
    }

    /// Computes the closest points between `self` and `other`, both expressed in the same
    /// frame.
    ///
    /// The first returned point lies on `self`, the second one on `other`.
    pub fn closest_points(&self, other: &Segment) -> (Point<Real>, Point<Real>) {
        closest_points_segment_segment((&self.a, &self.b), (&other.a, &other.b))
    }
}

impl From<[Point<Real>; 2]> for Segment {
    fn from(arr: [Point<Real>; 2]) -> Self {
        Segment::new(arr[0], arr[1])
    }
}
