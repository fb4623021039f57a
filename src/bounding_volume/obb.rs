//! Oriented Bounding Box.

use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume};
use crate::math::{Isometry, Matrix, Point, Real, Translation, Vector, DEFAULT_EPSILON, DIM};

/// An Oriented Bounding Box.
///
/// The box is centered at the origin of its `pose`, with its edges aligned with the axes of
/// that pose.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Obb {
    /// The frame of the box. Its translation is the box center.
    pub pose: Isometry<Real>,
    /// The half-extents of the box along each axis of its pose.
    pub half_extents: Vector<Real>,
}

impl Obb {
    /// Creates a new oriented box.
    #[inline]
    pub fn new(pose: Isometry<Real>, half_extents: Vector<Real>) -> Self {
        Self { pose, half_extents }
    }

    /// The eight corners of this box, expressed in the frame the box lives in.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        let local = Aabb::from_half_extents(Point::origin(), self.half_extents).vertices();
        local.map(|pt| self.pose * pt)
    }

    /// Tests whether two boxes overlap, where `pos12` maps points from `b2`'s frame into
    /// `b1`'s frame.
    ///
    /// This is the separating-axis test on the 15 candidate axes of a pair of boxes.
    pub fn intersects_oriented(pos12: &Isometry<Real>, b1: &Obb, b2: &Obb) -> bool {
        // Pose of b2 relative to b1's own frame.
        let rel = b1.pose.inv_mul(&(pos12 * b2.pose));
        let r: Matrix<Real> = rel.rotation.to_rotation_matrix().into_inner();
        let abs_r = r.abs().add_scalar(DEFAULT_EPSILON);
        let t = rel.translation.vector;
        let a = &b1.half_extents;
        let b = &b2.half_extents;

        for i in 0..DIM {
            let ra = a[i];
            let rb = b.dot(&abs_r.row(i).transpose());
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        for j in 0..DIM {
            let ra = a.dot(&abs_r.column(j));
            let rb = b[j];
            if t.dot(&r.column(j)).abs() > ra + rb {
                return false;
            }
        }

        for i in 0..DIM {
            let i1 = (i + 1) % DIM;
            let i2 = (i + 2) % DIM;

            for j in 0..DIM {
                let j1 = (j + 1) % DIM;
                let j2 = (j + 2) % DIM;

                let ra = a[i1] * abs_r[(i2, j)] + a[i2] * abs_r[(i1, j)];
                let rb = b[j1] * abs_r[(i, j2)] + b[j2] * abs_r[(i, j1)];
                let sep = (t[i2] * r[(i1, j)] - t[i1] * r[(i2, j)]).abs();

                if sep > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}

impl BoundingVolume for Obb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.pose.translation.vector.into()
    }

    #[inline]
    fn intersects(&self, other: &Obb) -> bool {
        Obb::intersects_oriented(&Isometry::identity(), self, other)
    }

    fn merged(&self, other: &Obb) -> Obb {
        let mut pts = [Point::origin(); 16];
        pts[..8].copy_from_slice(&self.vertices());
        pts[8..].copy_from_slice(&other.vertices());
        Obb::from_points(&pts)
    }

    #[inline]
    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), self.half_extents.norm())
    }

    fn from_points(pts: &[Point<Real>]) -> Self {
        let (pose, half_extents) = crate::utils::principal_frame(pts);
        Obb::new(pose, half_extents)
    }

    #[inline]
    fn from_aabb(aabb: &Aabb) -> Self {
        Obb::new(
            Translation::from(aabb.center().coords).into(),
            aabb.half_extents(),
        )
    }
}
