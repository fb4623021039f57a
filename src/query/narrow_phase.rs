use crate::math::{Isometry, Point, Real};
use crate::query::contact::{self, ContactPoint};
use crate::query::Unsupported;
use crate::shape::{Segment, Shape, Triangle};
use alloc::vec::Vec;

/// Exact primitive tests used by the traversal nodes on their leaves.
///
/// All positions and returned points are in world-space.
pub trait NarrowPhaseSolver: Send + Sync {
    /// Tests whether two shapes intersect.
    ///
    /// If `contacts` is given, the contact points found are appended to it.
    fn intersect(
        &self,
        g1: &dyn Shape,
        pos1: &Isometry<Real>,
        g2: &dyn Shape,
        pos2: &Isometry<Real>,
        contacts: Option<&mut Vec<ContactPoint>>,
    ) -> Result<bool, Unsupported>;

    /// Computes the distance between a shape and a triangle given in world-space.
    ///
    /// Returns the distance, the closest point on the shape and the closest point on the
    /// triangle. The distance is zero if they overlap.
    fn shape_triangle_distance(
        &self,
        g: &dyn Shape,
        pos: &Isometry<Real>,
        triangle: &Triangle,
    ) -> Result<(Real, Point<Real>, Point<Real>), Unsupported>;

    /// Can [`NarrowPhaseSolver::intersect`] handle this pair of shapes?
    fn supports_intersection(&self, g1: &dyn Shape, g2: &dyn Shape) -> bool;

    /// Can [`NarrowPhaseSolver::shape_triangle_distance`] handle this shape?
    fn supports_triangle_distance(&self, g: &dyn Shape) -> bool;
}

/// A narrow-phase solver for balls, capsules, and cuboids.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNarrowPhaseSolver;

impl DefaultNarrowPhaseSolver {
    fn contact(
        g1: &dyn Shape,
        pos1: &Isometry<Real>,
        g2: &dyn Shape,
        pos2: &Isometry<Real>,
    ) -> Result<Option<ContactPoint>, Unsupported> {
        if let (Some(b1), Some(b2)) = (g1.as_ball(), g2.as_ball()) {
            Ok(contact::contact_ball_ball(pos1, b1, pos2, b2))
        } else if let (Some(b1), Some(c2)) = (g1.as_ball(), g2.as_capsule()) {
            Ok(contact::contact_ball_capsule(pos1, b1, pos2, c2))
        } else if let (Some(c1), Some(b2)) = (g1.as_capsule(), g2.as_ball()) {
            Ok(contact::contact_ball_capsule(pos2, b2, pos1, c1).map(ContactPoint::flipped))
        } else if let (Some(c1), Some(c2)) = (g1.as_capsule(), g2.as_capsule()) {
            Ok(contact::contact_capsule_capsule(pos1, c1, pos2, c2))
        } else if let (Some(b1), Some(c2)) = (g1.as_ball(), g2.as_cuboid()) {
            Ok(contact::contact_ball_cuboid(pos1, b1, pos2, c2))
        } else if let (Some(c1), Some(b2)) = (g1.as_cuboid(), g2.as_ball()) {
            Ok(contact::contact_ball_cuboid(pos2, b2, pos1, c1).map(ContactPoint::flipped))
        } else if let (Some(c1), Some(c2)) = (g1.as_cuboid(), g2.as_cuboid()) {
            Ok(contact::contact_cuboid_cuboid(pos1, c1, pos2, c2))
        } else {
            Err(Unsupported)
        }
    }

    fn round_triangle_distance(
        center: &Point<Real>,
        radius: Real,
        on_triangle: Point<Real>,
    ) -> (Real, Point<Real>, Point<Real>) {
        let delta = on_triangle - center;
        let dist = delta.norm();

        if dist <= radius {
            (0.0, on_triangle, on_triangle)
        } else {
            (dist - radius, center + delta * (radius / dist), on_triangle)
        }
    }
}

impl NarrowPhaseSolver for DefaultNarrowPhaseSolver {
    fn intersect(
        &self,
        g1: &dyn Shape,
        pos1: &Isometry<Real>,
        g2: &dyn Shape,
        pos2: &Isometry<Real>,
        contacts: Option<&mut Vec<ContactPoint>>,
    ) -> Result<bool, Unsupported> {
        let found = Self::contact(g1, pos1, g2, pos2)?;

        match (found, contacts) {
            (Some(contact), Some(out)) => {
                out.push(contact);
                Ok(true)
            }
            (found, _) => Ok(found.is_some()),
        }
    }

    fn shape_triangle_distance(
        &self,
        g: &dyn Shape,
        pos: &Isometry<Real>,
        triangle: &Triangle,
    ) -> Result<(Real, Point<Real>, Point<Real>), Unsupported> {
        if let Some(ball) = g.as_ball() {
            let center = Point::from(pos.translation.vector);
            let proj = triangle.project_local_point(&center);
            Ok(Self::round_triangle_distance(&center, ball.radius, proj))
        } else if let Some(capsule) = g.as_capsule() {
            let segment: Segment = capsule.segment.transformed(pos);
            let (on_triangle, on_segment) = triangle.closest_points_with_segment(&segment);
            Ok(Self::round_triangle_distance(
                &on_segment,
                capsule.radius,
                on_triangle,
            ))
        } else {
            Err(Unsupported)
        }
    }

    fn supports_intersection(&self, g1: &dyn Shape, g2: &dyn Shape) -> bool {
        let supported = |g: &dyn Shape| {
            g.as_ball().is_some() || g.as_capsule().is_some() || g.as_cuboid().is_some()
        };
        let cuboid_capsule = (g1.as_cuboid().is_some() && g2.as_capsule().is_some())
            || (g1.as_capsule().is_some() && g2.as_cuboid().is_some());

        supported(g1) && supported(g2) && !cuboid_capsule
    }

    fn supports_triangle_distance(&self, g: &dyn Shape) -> bool {
        g.as_ball().is_some() || g.as_capsule().is_some()
    }
}
