//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::cov::{center_cov, cov};
pub use self::obb::principal_frame;

mod center;
mod cov;
mod obb;
