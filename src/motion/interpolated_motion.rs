use crate::bounding_volume::BoundingSphere;
use crate::math::{Isometry, Point, Real, Translation, Vector};
use crate::motion::Motion;
use crate::shape::Triangle;

/// A motion from a starting isometry traveling at constant translational and rotational
/// velocity over the time interval `[0, 1]`.
///
/// The rotation is applied around `local_center`, which travels at the linear velocity.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct InterpolatedMotion {
    /// The starting isometry at `t = 0`.
    pub start: Isometry<Real>,
    /// The local-space point at which the rotational part of this motion is applied.
    pub local_center: Point<Real>,
    /// The translational velocity of this motion.
    pub linvel: Vector<Real>,
    /// The angular velocity of this motion.
    pub angvel: Vector<Real>,
    t: Real,
}

impl InterpolatedMotion {
    /// Initialize a motion from a starting isometry and linear and angular velocities.
    pub fn new(
        start: Isometry<Real>,
        local_center: Point<Real>,
        linvel: Vector<Real>,
        angvel: Vector<Real>,
    ) -> Self {
        InterpolatedMotion {
            start,
            local_center,
            linvel,
            angvel,
            t: 0.0,
        }
    }

    /// A motion rotating around the local origin and reaching `end` at `t = 1`.
    pub fn between(start: Isometry<Real>, end: Isometry<Real>) -> Self {
        let linvel = end.translation.vector - start.translation.vector;
        let angvel = (end.rotation * start.rotation.inverse()).scaled_axis();
        Self::new(start, Point::origin(), linvel, angvel)
    }

    /// A motion with a constant linear velocity and no rotation.
    pub fn translation(start: Isometry<Real>, linvel: Vector<Real>) -> Self {
        Self::new(start, Point::origin(), linvel, Vector::zeros())
    }

    /// Create an `InterpolatedMotion` that always return `pos`.
    pub fn constant_position(pos: Isometry<Real>) -> Self {
        Self::translation(pos, Vector::zeros())
    }

    /// The position of the moving object at the time `t`.
    pub fn position_at_time(&self, t: Real) -> Isometry<Real> {
        let center = self.start * self.local_center;
        let shift = Translation::from(center.coords);
        (shift * Isometry::new(self.linvel * t, self.angvel * t)) * (shift.inverse() * self.start)
    }

    fn bound(&self, dir: &Vector<Real>, max_dist_to_center: Real) -> Real {
        self.linvel.dot(dir) + self.angvel.norm() * max_dist_to_center
    }
}

impl Motion for InterpolatedMotion {
    #[inline]
    fn current_transform(&self) -> Isometry<Real> {
        self.position_at_time(self.t)
    }

    #[inline]
    fn current_time(&self) -> Real {
        self.t
    }

    #[inline]
    fn integrate(&mut self, t: Real) {
        self.t = na::clamp(t, 0.0, 1.0);
    }

    fn sphere_motion_bound(&self, sphere: &BoundingSphere, dir: &Vector<Real>) -> Real {
        let max_dist = na::distance(&sphere.center, &self.local_center) + sphere.radius;
        self.bound(dir, max_dist)
    }

    fn triangle_motion_bound(&self, triangle: &Triangle, dir: &Vector<Real>) -> Real {
        let max_dist = triangle
            .vertices()
            .iter()
            .map(|pt| na::distance(pt, &self.local_center))
            .fold(0.0, Real::max);
        self.bound(dir, max_dist)
    }
}
