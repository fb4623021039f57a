use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume};
use crate::math::{Isometry, Real};
use crate::shape::{Ball, Capsule, Cuboid, Triangle};
use downcast_rs::{impl_downcast, DowncastSync};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// Enum representing the type of a shape.
pub enum ShapeType {
    /// A ball shape.
    Ball,
    /// A cuboid shape.
    Cuboid,
    /// A capsule shape.
    Capsule,
    /// A triangle shape.
    Triangle,
    /// A custom user-defined shape.
    Custom,
}

/// Trait implemented by all shapes supported by the traversal nodes.
///
/// Shapes are always expressed in their local frame; their pose is given separately to every
/// query. The narrow-phase solver recovers the concrete shape type through downcasting.
pub trait Shape: DowncastSync {
    /// Computes the AABB of this shape.
    fn compute_local_aabb(&self) -> Aabb;

    /// Computes the AABB of this shape with the given position.
    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        self.compute_local_aabb().transform_by(position)
    }

    /// Computes the bounding-sphere of this shape.
    fn compute_local_bounding_sphere(&self) -> BoundingSphere {
        self.compute_local_aabb().bounding_sphere()
    }

    /// Gets the type tag of this shape.
    fn shape_type(&self) -> ShapeType;
}

impl_downcast!(sync Shape);

impl dyn Shape {
    /// Converts this abstract shape to the given shape, if it is one.
    pub fn as_shape<T: Shape>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a ball, if it is one.
    pub fn as_ball(&self) -> Option<&Ball> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a cuboid, if it is one.
    pub fn as_cuboid(&self) -> Option<&Cuboid> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a capsule, if it is one.
    pub fn as_capsule(&self) -> Option<&Capsule> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a triangle, if it is one.
    pub fn as_triangle(&self) -> Option<&Triangle> {
        self.downcast_ref()
    }
}

impl Shape for Ball {
    fn compute_local_aabb(&self) -> Aabb {
        self.aabb(&Isometry::identity())
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        self.aabb(position)
    }

    fn compute_local_bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(crate::math::Point::origin(), self.radius)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Ball
    }
}

impl Shape for Cuboid {
    fn compute_local_aabb(&self) -> Aabb {
        self.local_aabb()
    }

    fn compute_local_bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(crate::math::Point::origin(), self.half_extents.norm())
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Cuboid
    }
}

impl Shape for Capsule {
    fn compute_local_aabb(&self) -> Aabb {
        self.aabb(&Isometry::identity())
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        self.aabb(position)
    }

    fn compute_local_bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), self.half_height() + self.radius)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Capsule
    }
}

impl Shape for Triangle {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices())
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Triangle
    }
}
