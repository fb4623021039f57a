//! Discrete collision between two shapes, with contact and cost-source accumulation.

pub use self::collision_request::{
    CollisionRequest, CollisionResult, Contact, CostSource,
};
pub use self::shape_collision_node::{collide, ShapeCollisionNode};

mod collision_request;
mod shape_collision_node;
