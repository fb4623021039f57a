use crate::math::{Isometry, Point, Real};
use crate::partitioning::RefitStrategy;

/// The parameters of a continuous collision query solved by conservative advancement.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContinuousCollisionRequest {
    /// The maximum number of advancement steps.
    pub max_iterations: usize,
    /// A time step smaller than this is considered a contact.
    pub toc_err: Real,
    /// Early-stop aggressiveness of the traversal, in `(0, 1]`.
    pub w: Real,
    /// Absolute tolerance on the distance used to prune the traversal.
    pub abs_err: Real,
    /// Relative tolerance on the distance used to prune the traversal.
    pub rel_err: Real,
    /// How the working copy of the mesh is refitted after each placement.
    pub refit: RefitStrategy,
}

impl Default for ContinuousCollisionRequest {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            toc_err: 1.0e-4,
            w: 1.0,
            abs_err: 0.0,
            rel_err: 0.0,
            refit: RefitStrategy::Rebuild,
        }
    }
}

/// The output of a continuous collision query.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContinuousCollisionResult {
    /// Whether the objects touch before the end of their motions.
    pub is_collide: bool,
    /// The normalized time of contact, or the time reached if there is no contact.
    pub time_of_contact: Real,
    /// The position of the shape at `time_of_contact`.
    pub contact_pos1: Isometry<Real>,
    /// The position of the mesh at `time_of_contact`.
    pub contact_pos2: Isometry<Real>,
    /// The distance found by the last traversal pass.
    pub min_distance: Real,
    /// The closest points on the shape and on the mesh found by the last pass, in world-space.
    pub closest_points: (Point<Real>, Point<Real>),
    /// The mesh triangle closest to the shape during the last pass.
    pub last_triangle: Option<u32>,
    /// The number of traversal passes run.
    pub num_iterations: usize,
}
