//! Non-persistent geometric queries.
//!
//! # General cases
//! The most general methods provided by this module are:
//!
//! * [`query::collide()`] to test two shapes for collision, accumulating contacts and cost sources.
//! * [`query::shape_mesh_conservative_advancement()`] to compute the time of contact between a
//!   moving shape and a moving triangle mesh whose hierarchy is refitted at each step.
//! * [`query::shape_mesh_conservative_advancement_oriented()`] to compute the same time of
//!   contact with an oriented bounding-volume hierarchy left untouched.
//!
//! These functions only drive the traversal nodes of this module ([`ShapeCollisionNode`],
//! [`ShapeMeshConservativeAdvancementNode`], [`ShapeMeshOrientedConservativeAdvancementNode`])
//! with the recursions of [`crate::partitioning`]. The exact tests on the leaves are delegated
//! to a [`NarrowPhaseSolver`].
//!
//! # Specific cases
//! The functions exported by the `details` submodule are more specific versions of the ones described above.
//! They have the form `[operation]_[shape1]_[shape2]()` where:
//!
//! * `[operation]` can be `closest_points`, `contact`, or `cuboid_cuboid_find_local_separating_*`.
//! * `[shape1]` is the type of the first shape passed to the function, e.g., `ball`, or `cuboid`.
//! * `[shape2]` is the type of the second shape passed to the function, e.g., `ball`, or `cuboid`.
//!
//! [`query::collide()`]: crate::query::collide
//! [`query::shape_mesh_conservative_advancement()`]: crate::query::shape_mesh_conservative_advancement
//! [`query::shape_mesh_conservative_advancement_oriented()`]: crate::query::shape_mesh_conservative_advancement_oriented

pub use self::collision::{
    collide, CollisionRequest, CollisionResult, Contact, CostSource, ShapeCollisionNode,
};
pub use self::conservative_advancement::{
    shape_mesh_conservative_advancement, shape_mesh_conservative_advancement_oriented,
    ConservativeAdvancementStackData, ConservativeAdvancementState, ContinuousCollisionRequest,
    ContinuousCollisionResult, ShapeMeshConservativeAdvancementNode,
    ShapeMeshConservativeAdvancementNodeAabb, ShapeMeshConservativeAdvancementNodeObbRss,
    ShapeMeshConservativeAdvancementNodeRss, ShapeMeshOrientedConservativeAdvancementNode,
};
pub use self::contact::ContactPoint;
pub use self::error::Unsupported;
pub use self::narrow_phase::{DefaultNarrowPhaseSolver, NarrowPhaseSolver};

mod closest_points;
mod collision;
mod conservative_advancement;
mod contact;
mod error;
mod narrow_phase;
mod sat;

/// Queries dedicated to specific pairs of shapes, and the building blocks of the traversal
/// nodes.
pub mod details {
    pub use super::closest_points::{
        closest_points_segment_segment, closest_points_segment_segment_parameters,
    };
    pub use super::conservative_advancement::{
        mesh_shape_conservative_advancement_oriented_can_stop,
        mesh_shape_conservative_advancement_oriented_leaf_testing,
    };
    pub use super::contact::{
        contact_ball_ball, contact_ball_capsule, contact_ball_cuboid, contact_capsule_capsule,
        contact_cuboid_cuboid, contact_sphere_sphere,
    };
    pub use super::sat::{
        cuboid_cuboid_compute_separation_wrt_local_line,
        cuboid_cuboid_find_local_separating_axis,
        cuboid_cuboid_find_local_separating_edge_twoway,
        cuboid_cuboid_find_local_separating_normal_oneway, cuboid_local_support_point,
    };
}
