//! Bounding sphere.

use crate::bounding_volume::{Aabb, BoundingVolume, BvDistance};
use crate::math::{Isometry, Point, Real};
use na;
use num::Zero;

/// A Bounding Sphere.
///
/// Besides being a bounding volume on its own, this is what motion bounds are computed
/// against during conservative advancement.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The center of the sphere.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Transforms this bounding sphere by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> BoundingSphere {
        BoundingSphere::new(m * self.center, self.radius)
    }

    /// Merges this bounding sphere with another one, in-place.
    pub fn merge(&mut self, other: &BoundingSphere) {
        let mut dir = *other.center() - *self.center();
        let norm = dir.normalize_mut();

        if norm.is_zero() {
            if other.radius > self.radius {
                self.radius = other.radius
            }
        } else {
            let s_center_dir = self.center.coords.dot(&dir);
            let o_center_dir = other.center.coords.dot(&dir);

            let right = if s_center_dir + self.radius > o_center_dir + other.radius {
                self.center + dir * self.radius
            } else {
                other.center + dir * other.radius
            };

            let left = if -s_center_dir + self.radius > -o_center_dir + other.radius {
                self.center - dir * self.radius
            } else {
                other.center - dir * other.radius
            };

            self.center = na::center(&left, &right);
            self.radius = na::distance(&right, &self.center);
        }
    }
}

impl BoundingVolume for BoundingSphere {
    #[inline]
    fn center(&self) -> Point<Real> {
        *self.center()
    }

    #[inline]
    fn intersects(&self, other: &BoundingSphere) -> bool {
        let delta_pos = other.center - self.center;
        let distance_squared = delta_pos.norm_squared();
        let sum_radius = self.radius + other.radius;

        distance_squared <= sum_radius * sum_radius
    }

    #[inline]
    fn merged(&self, other: &BoundingSphere) -> BoundingSphere {
        let mut res = *self;
        res.merge(other);
        res
    }

    #[inline]
    fn bounding_sphere(&self) -> BoundingSphere {
        *self
    }

    fn from_points(pts: &[Point<Real>]) -> Self {
        let center = Aabb::from_points(pts).center();
        let radius = pts
            .iter()
            .map(|pt| na::distance_squared(pt, &center))
            .fold(0.0, Real::max)
            .sqrt();

        BoundingSphere::new(center, radius)
    }

    fn from_aabb(aabb: &Aabb) -> Self {
        aabb.bounding_sphere()
    }
}

impl BvDistance for BoundingSphere {
    fn distance(&self, other: &BoundingSphere) -> (Real, Point<Real>, Point<Real>) {
        let delta = other.center - self.center;
        let center_dist = delta.norm();
        let dist = (center_dist - self.radius - other.radius).max(0.0);

        if center_dist.is_zero() {
            return (dist, self.center, other.center);
        }

        let dir = delta / center_dist;

        if dist > 0.0 {
            (
                dist,
                self.center + dir * self.radius,
                other.center - dir * other.radius,
            )
        } else {
            // Overlap: use the middle of the lens along the center line.
            let lo = (center_dist - other.radius).max(-self.radius);
            let hi = self.radius.min(center_dist + other.radius);
            let mid = self.center + dir * ((lo + hi) * 0.5);
            (dist, mid, mid)
        }
    }
}
