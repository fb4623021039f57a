use crate::bounding_volume::{
    Aabb, BoundingSphere, BoundingVolume, BvDistance, Obb, OrientedBvDistance, Rss,
};
use crate::math::{Isometry, Point, Real};

/// A pair of an oriented box and a rectangle swept sphere bounding the same geometry.
///
/// Overlap tests use the box, distance queries use the swept sphere.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ObbRss {
    /// The oriented box.
    pub obb: Obb,
    /// The rectangle swept sphere.
    pub rss: Rss,
}

impl ObbRss {
    /// Creates a new combined volume.
    #[inline]
    pub fn new(obb: Obb, rss: Rss) -> Self {
        Self { obb, rss }
    }
}

impl BoundingVolume for ObbRss {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.obb.center()
    }

    #[inline]
    fn intersects(&self, other: &ObbRss) -> bool {
        self.obb.intersects(&other.obb)
    }

    fn merged(&self, other: &ObbRss) -> ObbRss {
        ObbRss::new(self.obb.merged(&other.obb), self.rss.merged(&other.rss))
    }

    #[inline]
    fn bounding_sphere(&self) -> BoundingSphere {
        let a = self.obb.bounding_sphere();
        let b = self.rss.bounding_sphere();
        if a.radius <= b.radius {
            a
        } else {
            b
        }
    }

    fn from_points(pts: &[Point<Real>]) -> Self {
        ObbRss::new(Obb::from_points(pts), Rss::from_points(pts))
    }

    fn from_aabb(aabb: &Aabb) -> Self {
        ObbRss::new(Obb::from_aabb(aabb), Rss::from_aabb(aabb))
    }
}

impl OrientedBvDistance for ObbRss {
    #[inline]
    fn distance_oriented(
        pos12: &Isometry<Real>,
        bv1: &ObbRss,
        bv2: &ObbRss,
    ) -> (Real, Point<Real>, Point<Real>) {
        Rss::distance_oriented(pos12, &bv1.rss, &bv2.rss)
    }
}

impl BvDistance for ObbRss {
    #[inline]
    fn distance(&self, other: &ObbRss) -> (Real, Point<Real>, Point<Real>) {
        self.rss.distance(&other.rss)
    }
}
