//! Shapes supported by the traversal nodes.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::collision_geometry::{CollisionGeometry, GeometryId, Occupancy};
pub use self::cuboid::Cuboid;
pub use self::feature_id::FeatureId;
pub use self::segment::Segment;
#[doc(inline)]
pub use self::shape::{Shape, ShapeType};
pub use self::triangle::Triangle;

mod ball;
mod capsule;
mod collision_geometry;
mod cuboid;
mod feature_id;
mod segment;
mod shape;
mod triangle;
