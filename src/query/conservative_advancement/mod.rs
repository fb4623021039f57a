//! Continuous collision detection between a shape and a triangle mesh by conservative
//! advancement.
//!
//! Each pass of the algorithm traverses the mesh hierarchy to find the distance between the
//! shape and the mesh, together with a time step `delta_t` during which, given the motion
//! bounds of both objects, they cannot touch. Both objects are then advanced by `delta_t`,
//! until the distance or the time step becomes negligible.

pub use self::conservative_advancement_state::{
    ConservativeAdvancementStackData, ConservativeAdvancementState,
};
pub use self::continuous_collision_request::{
    ContinuousCollisionRequest, ContinuousCollisionResult,
};
pub use self::mesh_shape_conservative_advancement::{
    mesh_shape_conservative_advancement_oriented_can_stop,
    mesh_shape_conservative_advancement_oriented_leaf_testing,
};
pub use self::shape_mesh_conservative_advancement::{
    shape_mesh_conservative_advancement, shape_mesh_conservative_advancement_oriented,
};
pub use self::shape_mesh_conservative_advancement_node::{
    ShapeMeshConservativeAdvancementNode, ShapeMeshConservativeAdvancementNodeAabb,
};
pub use self::shape_mesh_oriented_conservative_advancement_node::{
    ShapeMeshConservativeAdvancementNodeObbRss, ShapeMeshConservativeAdvancementNodeRss,
    ShapeMeshOrientedConservativeAdvancementNode,
};

mod conservative_advancement_state;
mod continuous_collision_request;
mod mesh_shape_conservative_advancement;
mod shape_mesh_conservative_advancement;
mod shape_mesh_conservative_advancement_node;
mod shape_mesh_oriented_conservative_advancement_node;
