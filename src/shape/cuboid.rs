//! Support mapping based Cuboid shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// Shape of a box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its half-extents. Half-extents are the box half-width along each
    /// axis. Each half-extent must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }

    /// Computes the local AABB of this cuboid.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), self.half_extents)
    }

    /// The eight vertices of this cuboid, in its local frame.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        self.local_aabb().vertices()
    }

    /// Projects a point on this cuboid, seen as a solid.
    ///
    /// Points inside of the cuboid are left unchanged.
    #[inline]
    pub fn project_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        let mins = -self.half_extents;
        let maxs = self.half_extents;
        Point::from(pt.coords.sup(&mins).inf(&maxs))
    }

    /// Checks if the given point, expressed in the local frame, lies inside this cuboid.
    #[inline]
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.local_aabb().contains_local_point(pt)
    }
}
