use common::{Filter, FilterError, SupervisedFilter};
use nalgebra::{DMatrix, DVector};

use crate::weighting::{apply_projection, center_columns, projection_from_covariance};

/// Convergence tolerance of the difference-matrix SVD
const SVD_EPS: f64 = 1.0e-12;
/// Iteration cap of the difference-matrix SVD
const SVD_MAX_NITER: usize = 500;

/// External parameter orthogonalization
///
/// A GLSW variant that only damps the `n_components` strongest interference
/// directions of the replicate difference. All remaining directions carry no
/// eigen-energy in the truncated covariance and therefore pass through the
/// shared weighting unfiltered.
#[derive(Debug, Clone)]
pub struct Epo {
    alpha: f64,
    n_components: usize,
    projection: Option<DMatrix<f64>>,
}

impl Epo {
    /// Create a new, unconfigured EPO filter
    ///
    /// # Arguments:
    /// alpha: Strictly positive damping term
    /// n_components: Number of interference directions to retain, at least 1;
    /// the upper bound is checked against the column count at configure time
    pub fn new(alpha: f64, n_components: usize) -> Result<Self, FilterError> {
        if alpha <= 0.0 {
            return Err(FilterError::ParameterRange {
                name: "alpha",
                value: alpha,
            });
        }
        if n_components == 0 {
            return Err(FilterError::ParameterRange {
                name: "n_components",
                value: 0.0,
            });
        }
        Ok(Self {
            alpha,
            n_components,
            projection: None,
        })
    }

    /// The damping term
    #[inline(always)]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Update the damping term, dropping any cached projection
    ///
    /// Non-positive values are ignored with a warning, as for
    /// [`crate::Glsw::set_alpha`].
    pub fn set_alpha(&mut self, alpha: f64) {
        if alpha <= 0.0 {
            warn!("ignoring non-positive alpha {}, keeping {}", alpha, self.alpha);
            return;
        }
        self.alpha = alpha;
        self.projection = None;
    }

    /// The number of retained interference directions
    #[inline(always)]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Update the number of retained directions, dropping any cached
    /// projection
    pub fn set_n_components(&mut self, n_components: usize) -> Result<(), FilterError> {
        if n_components == 0 {
            return Err(FilterError::ParameterRange {
                name: "n_components",
                value: 0.0,
            });
        }
        self.n_components = n_components;
        self.projection = None;

        Ok(())
    }

    /// Compute and cache the projection matrix from two replicate
    /// measurement conditions
    ///
    /// # Arguments:
    /// x1: Samples measured under the first condition
    /// x2: The same samples measured under the second condition, same shape
    pub fn configure(&mut self, x1: &DMatrix<f64>, x2: &DMatrix<f64>) -> Result<(), FilterError> {
        self.projection = None;
        if x1.shape() != x2.shape() {
            return Err(FilterError::ShapeMismatch {
                expected: x1.shape(),
                actual: x2.shape(),
            });
        }
        if self.n_components > x1.ncols() {
            return Err(FilterError::ParameterRange {
                name: "n_components",
                value: self.n_components as f64,
            });
        }

        let xd = center_columns(x2)? - center_columns(x1)?;

        let svd = xd
            .clone()
            .try_svd(false, true, SVD_EPS, SVD_MAX_NITER)
            .ok_or(FilterError::Decomposition("singular value decomposition did not converge"))?;
        let v_t = svd
            .v_t
            .ok_or(FilterError::Decomposition("singular value decomposition produced no V"))?;

        // with fewer singular directions than requested, the missing ones
        // carry zero energy anyway
        let retained = self.n_components.min(svd.singular_values.len());
        let directions = v_t.rows(0, retained).transpose();
        let energies: DVector<f64> =
            DVector::from_fn(retained, |i, _| svd.singular_values[i] * svd.singular_values[i]);
        let cov = &directions * DMatrix::from_diagonal(&energies) * directions.transpose();

        self.projection = Some(projection_from_covariance(&cov, self.alpha)?);

        Ok(())
    }

    /// The cached projection matrix, if configured
    #[inline(always)]
    pub fn projection(&self) -> Option<&DMatrix<f64>> {
        self.projection.as_ref()
    }
}

impl Filter for Epo {
    fn transform(&self, predictors: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
        apply_projection(self.projection.as_ref(), predictors)
    }

    #[inline(always)]
    fn reset(&mut self) {
        self.projection = None;
    }

    #[inline(always)]
    fn is_configured(&self) -> bool {
        self.projection.is_some()
    }
}

impl SupervisedFilter for Epo {
    /// The second replicate is passed through the supervised contract's
    /// response slot
    fn initialize(
        &mut self,
        predictors: &DMatrix<f64>,
        response: &DMatrix<f64>,
    ) -> Result<(), FilterError> {
        self.configure(predictors, response)
    }
}
