use crate::math::{Isometry, Point, Real, Rotation, Translation, Vector, DIM};

/// Computes a principal-axes frame and the half-extents of the given set of points in this frame.
///
/// The columns of the returned rotation are the eigenvectors of the covariance matrix of
/// `pts`, sorted by decreasing eigenvalue: the first axis is the direction of largest
/// spread and the last one the direction of smallest spread. The translation part of the
/// returned isometry is the center of the box enclosing `pts` in that frame.
///
/// The resulting box is not guaranteed to be the smallest enclosing oriented box, though it
/// is a good one for most purposes.
pub fn principal_frame(pts: &[Point<Real>]) -> (Isometry<Real>, Vector<Real>) {
    if pts.is_empty() {
        return (Isometry::identity(), Vector::zeros());
    }

    let cov = crate::utils::cov(pts);
    let eig = cov.symmetric_eigen();

    let mut order = [0, 1, 2];
    order.sort_by(|a, b| eig.eigenvalues[*b].total_cmp(&eig.eigenvalues[*a]));

    let mut eigv = eig.eigenvectors;
    for (i, j) in order.iter().enumerate() {
        eigv.set_column(i, &eig.eigenvectors.column(*j));
    }

    if eigv.determinant() < 0.0 {
        let flipped = -eigv.column(2);
        eigv.set_column(2, &flipped);
    }

    let mut mins = Vector::repeat(Real::MAX);
    let mut maxs = Vector::repeat(-Real::MAX);

    for pt in pts {
        for i in 0..DIM {
            let dot = eigv.column(i).dot(&pt.coords);
            mins[i] = mins[i].min(dot);
            maxs[i] = maxs[i].max(dot);
        }
    }

    let rot = Rotation::from_rotation_matrix(&na::Rotation3::from_matrix_unchecked(eigv));

    (
        rot * Translation::from((maxs + mins) / 2.0),
        (maxs - mins) / 2.0,
    )
}
