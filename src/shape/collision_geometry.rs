use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::Shape;

/// A user-chosen identifier attached to a geometry and reported in contacts.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct GeometryId(pub u64);

/// Occupancy information of a geometry, as found in occupancy grids.
///
/// A geometry is *occupied* if its cost density reaches `threshold_occupied`, *free* if it
/// does not exceed `threshold_free`, and *uncertain* otherwise.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Occupancy {
    /// The collision cost per unit volume.
    pub cost_density: Real,
    /// The threshold above which the geometry is considered occupied.
    pub threshold_occupied: Real,
    /// The threshold below which the geometry is considered free.
    pub threshold_free: Real,
}

impl Default for Occupancy {
    fn default() -> Self {
        Self {
            cost_density: 1.0,
            threshold_occupied: 1.0,
            threshold_free: 0.0,
        }
    }
}

impl Occupancy {
    /// An occupancy with the given cost density and the default thresholds.
    pub fn with_cost_density(cost_density: Real) -> Self {
        Self {
            cost_density,
            ..Default::default()
        }
    }

    /// Is the geometry definitely occupied?
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.cost_density >= self.threshold_occupied
    }

    /// Is the geometry definitely free?
    #[inline]
    pub fn is_free(&self) -> bool {
        self.cost_density <= self.threshold_free
    }

    /// Is the geometry neither occupied nor free?
    #[inline]
    pub fn is_uncertain(&self) -> bool {
        !self.is_occupied() && !self.is_free()
    }
}

/// A shape placed in the world, together with the data the collision queries report about it.
///
/// The shape is borrowed: it is caller-owned and must outlive the query.
#[derive(Copy, Clone)]
pub struct CollisionGeometry<'a> {
    /// The identifier reported in contacts involving this geometry.
    pub id: GeometryId,
    /// The shape of this geometry, in its local frame.
    pub shape: &'a dyn Shape,
    /// The world-space position of the shape.
    pub position: Isometry<Real>,
    /// The occupancy information of this geometry.
    pub occupancy: Occupancy,
}

impl<'a> CollisionGeometry<'a> {
    /// A fully occupied geometry.
    pub fn new(id: GeometryId, shape: &'a dyn Shape, position: Isometry<Real>) -> Self {
        Self {
            id,
            shape,
            position,
            occupancy: Occupancy::default(),
        }
    }

    /// Replaces the occupancy information of this geometry.
    pub fn with_occupancy(mut self, occupancy: Occupancy) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// The world-space AABB of this geometry.
    #[inline]
    pub fn compute_aabb(&self) -> Aabb {
        self.shape.compute_aabb(&self.position)
    }
}

impl core::fmt::Debug for CollisionGeometry<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollisionGeometry")
            .field("id", &self.id)
            .field("shape_type", &self.shape.shape_type())
            .field("position", &self.position)
            .field("occupancy", &self.occupancy)
            .finish()
    }
}
