//! Bounding volumes.

#[doc(inline)]
pub use crate::bounding_volume::aabb::Aabb;
#[doc(inline)]
pub use crate::bounding_volume::bounding_sphere::BoundingSphere;
#[doc(inline)]
pub use crate::bounding_volume::bounding_volume::{
    BoundingVolume, BvDistance, OrientedBvDistance,
};
#[doc(inline)]
pub use crate::bounding_volume::obb::Obb;
#[doc(inline)]
pub use crate::bounding_volume::obbrss::ObbRss;
#[doc(inline)]
pub use crate::bounding_volume::rss::Rss;

#[doc(hidden)]
pub mod aabb;
#[doc(hidden)]
pub mod bounding_sphere;
#[doc(hidden)]
pub mod bounding_volume;
mod obb;
mod obbrss;
mod rss;

/// Free functions for some special cases of bounding-volume computation.
pub mod details {
    pub use super::rss::rectangle_rectangle_closest_points;
}
