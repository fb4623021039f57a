//! Rigid motions and their displacement bounds.

pub use self::interpolated_motion::InterpolatedMotion;
pub use self::motion::Motion;

mod interpolated_motion;
mod motion;
