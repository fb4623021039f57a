//! Bounding-volume hierarchies over triangle meshes, and the recursions traversing them.

pub use self::bvh_model::{
    BvNode, BvhModel, BvhModelError, MeshWorkingCopy, RefitStrategy, ReplaceScope,
};
pub use self::traversal::{
    collision_recurse, distance_recurse, CollisionTraversalNode, DistanceTraversalNode,
};

mod bvh_model;
mod traversal;
