use core::fmt;

/// Error indicating that a geometric query is not supported between certain shape combinations.
///
/// Traversal nodes check that their narrow-phase solver supports the shapes they are given
/// when they are built, so this error never surfaces in the middle of a traversal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Unsupported;

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("query not supported between these shapes")
    }
}

impl core::error::Error for Unsupported {}
