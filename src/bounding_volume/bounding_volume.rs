use crate::bounding_volume::{Aabb, BoundingSphere};
use crate::math::{Isometry, Point, Real};

/// Trait of bounding volumes.
///
/// Bounding volumes are coarse approximations of shapes. It usually have constant time
/// intersection test. Two bounding volume must also be mergeable into a bigger bounding
/// volume, which is what the bottom-up refit of a [`BvhModel`](crate::partitioning::BvhModel)
/// relies on.
pub trait BoundingVolume: Clone {
    /// Returns a point inside of this bounding volume. This is ideally its center.
    fn center(&self) -> Point<Real>;

    /// Checks if this bounding volume intersect with another one.
    fn intersects(&self, _: &Self) -> bool;

    /// Merges this bounding volume with another one.
    ///
    /// The result is only required to contain both `self` and the other volume; it does not
    /// have to be the tightest such volume.
    fn merged(&self, _: &Self) -> Self;

    /// A sphere enclosing this bounding volume, expressed in the same frame.
    fn bounding_sphere(&self) -> BoundingSphere;

    /// Fits a bounding volume around a set of points.
    fn from_points(pts: &[Point<Real>]) -> Self;

    /// A bounding volume of this family enclosing the given AABB.
    fn from_aabb(aabb: &Aabb) -> Self;
}

/// Bounding volumes able to compute their distance to another bounding volume expressed in
/// the same frame.
pub trait BvDistance {
    /// The distance between `self` and `other`, together with a pair of witness points, one
    /// on each volume.
    ///
    /// The distance is zero if both volumes overlap.
    fn distance(&self, other: &Self) -> (Real, Point<Real>, Point<Real>);
}

/// Bounding volumes able to compute their distance to another bounding volume living in a
/// different frame.
pub trait OrientedBvDistance: Sized {
    /// The distance between `bv1` and `bv2`, where `pos12` maps points from `bv2`'s frame
    /// into `bv1`'s frame.
    ///
    /// Both returned witness points are expressed in `bv1`'s frame.
    fn distance_oriented(
        pos12: &Isometry<Real>,
        bv1: &Self,
        bv2: &Self,
    ) -> (Real, Point<Real>, Point<Real>);
}
