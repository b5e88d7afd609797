use common::{Filter, FilterError, MeanCenter};
use nalgebra::{DMatrix, DVector};

/// Convergence tolerance of the iterative decompositions
const DECOMP_EPS: f64 = 1.0e-12;
/// Iteration cap of the iterative decompositions
const DECOMP_MAX_NITER: usize = 500;

/// Center the columns of `data` around their means
pub(crate) fn center_columns(data: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
    let mut centering = MeanCenter::new();
    centering.configure(data)?;
    centering.transform(data)
}

/// Build the symmetric projection matrix from an interference covariance
///
/// Eigenvectors come from the symmetric eigendecomposition, the spectrum
/// from the singular value decomposition of the same covariance. The
/// eigenpairs are sorted by descending eigenvalue so their columns line up
/// with the descending singular values; for a positive semi-definite
/// covariance the two spectra coincide.
///
/// The diagonal weights are `sqrt(s^2 / alpha + 1)`, so directions with
/// large interference energy are damped and zero-energy directions pass
/// through untouched. `alpha > 0` is enforced by the callers.
pub(crate) fn projection_from_covariance(
    cov: &DMatrix<f64>,
    alpha: f64,
) -> Result<DMatrix<f64>, FilterError> {
    let n = cov.ncols();

    let eigen = cov
        .clone()
        .try_symmetric_eigen(DECOMP_EPS, DECOMP_MAX_NITER)
        .ok_or(FilterError::Decomposition("symmetric eigendecomposition did not converge"))?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut eigenvectors: DMatrix<f64> = DMatrix::zeros(n, n);
    for (dst, &src) in order.iter().enumerate() {
        eigenvectors.set_column(dst, &eigen.eigenvectors.column(src));
    }

    let svd = cov
        .clone()
        .try_svd(false, false, DECOMP_EPS, DECOMP_MAX_NITER)
        .ok_or(FilterError::Decomposition("singular value decomposition did not converge"))?;

    let d_inv: DVector<f64> = DVector::from_fn(n, |i, _| {
        let s = if i < svd.singular_values.len() {
            svd.singular_values[i]
        } else {
            0.0
        };
        1.0 / (s * s / alpha + 1.0).sqrt()
    });

    Ok(&eigenvectors * DMatrix::from_diagonal(&d_inv) * eigenvectors.transpose())
}

/// Apply a cached projection to new predictors
pub(crate) fn apply_projection(
    projection: Option<&DMatrix<f64>>,
    predictors: &DMatrix<f64>,
) -> Result<DMatrix<f64>, FilterError> {
    let projection = projection.ok_or(FilterError::Unconfigured)?;
    if predictors.ncols() != projection.nrows() {
        return Err(FilterError::ShapeMismatch {
            expected: (predictors.nrows(), projection.nrows()),
            actual: (predictors.nrows(), predictors.ncols()),
        });
    }

    Ok(predictors * projection)
}
