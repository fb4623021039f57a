use crate::bounding_volume::BoundingSphere;
use crate::math::{Isometry, Real, Vector};
use crate::shape::Triangle;

/// A continuous rigid motion over the normalized time interval `[0, 1]`, able to bound the
/// displacement of the geometries it carries.
///
/// Motion bounds are what conservative advancement relies on: if two objects are at a distance
/// `d` and the bounds along the direction joining them sum up to `b`, they cannot touch before
/// an additional time of `d / b`.
pub trait Motion {
    /// The position at the current time.
    fn current_transform(&self) -> Isometry<Real>;

    /// The current time, in `[0, 1]`.
    fn current_time(&self) -> Real;

    /// Moves this motion to the time `t`, clamped to `[0, 1]`.
    fn integrate(&mut self, t: Real);

    /// An upper bound of the displacement along `dir`, per unit of time, of any point of
    /// `sphere` (expressed in the local frame of the moving object).
    ///
    /// `dir` is a unit vector expressed in the world frame. The result may be negative if the
    /// object moves away from `dir`.
    fn sphere_motion_bound(&self, sphere: &BoundingSphere, dir: &Vector<Real>) -> Real;

    /// An upper bound of the displacement along `dir`, per unit of time, of any point of
    /// `triangle` (expressed in the local frame of the moving object).
    fn triangle_motion_bound(&self, triangle: &Triangle, dir: &Vector<Real>) -> Real;
}

/// An isometry is a motion that never moves.
impl Motion for Isometry<Real> {
    #[inline]
    fn current_transform(&self) -> Isometry<Real> {
        *self
    }

    #[inline]
    fn current_time(&self) -> Real {
        0.0
    }

    #[inline]
    fn integrate(&mut self, _: Real) {}

    #[inline]
    fn sphere_motion_bound(&self, _: &BoundingSphere, _: &Vector<Real>) -> Real {
        0.0
    }

    #[inline]
    fn triangle_motion_bound(&self, _: &Triangle, _: &Vector<Real>) -> Real {
        0.0
    }
}
