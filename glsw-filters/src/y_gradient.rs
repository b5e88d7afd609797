use common::{Filter, FilterError, SupervisedFilter};
use nalgebra::{DMatrix, DVector};

use crate::weighting::{apply_projection, projection_from_covariance};

/// Y-gradient generalized least squares weighting
///
/// Builds the interference covariance from a single predictor matrix and its
/// response instead of two replicate conditions. Samples are sorted by
/// ascending response and differenced pairwise; differences between samples
/// that are close in response carry mostly interference, while differences
/// across a large response gap mostly carry the signal of interest and are
/// damped out of the covariance estimate.
#[derive(Debug, Clone)]
pub struct YGradientGlsw {
    alpha: f64,
    projection: Option<DMatrix<f64>>,
}

impl YGradientGlsw {
    /// Create a new, unconfigured y-gradient GLSW filter
    ///
    /// # Arguments:
    /// alpha: Strictly positive damping term; larger values mean weaker
    /// filtering
    pub fn new(alpha: f64) -> Result<Self, FilterError> {
        if alpha <= 0.0 {
            return Err(FilterError::ParameterRange {
                name: "alpha",
                value: alpha,
            });
        }
        Ok(Self {
            alpha,
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

    /// Compute and cache the projection matrix from predictors and their
    /// response
    ///
    /// # Arguments:
    /// predictors: A matrix with one row per sample, at least two rows
    /// response: A single-column matrix with the same row count
    pub fn configure(
        &mut self,
        predictors: &DMatrix<f64>,
        response: &DMatrix<f64>,
    ) -> Result<(), FilterError> {
        self.projection = None;
        if response.ncols() != 1 || response.nrows() != predictors.nrows() {
            return Err(FilterError::ShapeMismatch {
                expected: (predictors.nrows(), 1),
                actual: response.shape(),
            });
        }
        if predictors.nrows() < 2 {
            return Err(FilterError::ShapeMismatch {
                expected: (2, predictors.ncols()),
                actual: predictors.shape(),
            });
        }

        let mut order: Vec<usize> = (0..predictors.nrows()).collect();
        order.sort_by(|&a, &b| {
            response[(a, 0)]
                .partial_cmp(&response[(b, 0)])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let n_diffs = predictors.nrows() - 1;
        let y_diffs: DVector<f64> = DVector::from_fn(n_diffs, |i, _| {
            response[(order[i + 1], 0)] - response[(order[i], 0)]
        });

        // gaussian weights in the response gradient, scaled by the variance
        // of the gradient; a constant gradient degrades to unit weights
        let mean = y_diffs.mean();
        let variance = y_diffs.map(|d| (d - mean) * (d - mean)).mean();
        let weights: DVector<f64> = if variance > 0.0 {
            y_diffs.map(|d| (-d * d / (2.0 * variance)).exp())
        } else {
            DVector::from_element(n_diffs, 1.0)
        };

        let xd: DMatrix<f64> = DMatrix::from_fn(n_diffs, predictors.ncols(), |i, j| {
            weights[i] * (predictors[(order[i + 1], j)] - predictors[(order[i], j)])
        });

        let cov = xd.transpose() * &xd;
        self.projection = Some(projection_from_covariance(&cov, self.alpha)?);

        Ok(())
    }

    /// The cached projection matrix, if configured
    #[inline(always)]
    pub fn projection(&self) -> Option<&DMatrix<f64>> {
        self.projection.as_ref()
    }
}

impl Filter for YGradientGlsw {
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

impl SupervisedFilter for YGradientGlsw {
    fn initialize(
        &mut self,
        predictors: &DMatrix<f64>,
        response: &DMatrix<f64>,
    ) -> Result<(), FilterError> {
        self.configure(predictors, response)
    }
}
