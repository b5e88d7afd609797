use nalgebra::{DMatrix, RowDVector};

use crate::{Filter, FilterError, ResponseFilter};

/// Column mean-centering filter
///
/// Caches the per-column means of the configuration data and subtracts them
/// from every row on `transform`. This one is invertible: `inverse_transform`
/// adds the cached means back, which is what makes it usable for un-scaling
/// predictions through the [`ResponseFilter`] contract.
#[derive(Debug, Clone, Default)]
pub struct MeanCenter {
    means: Option<RowDVector<f64>>,
}

impl MeanCenter {
    /// Create a new, unconfigured centering filter
    pub fn new() -> Self {
        Self {
            means: None,
        }
    }

    /// Compute and cache the per-column means of the given data
    ///
    /// # Arguments:
    /// data: A matrix with one row per sample; needs at least one row
    pub fn configure(&mut self, data: &DMatrix<f64>) -> Result<(), FilterError> {
        self.means = None;
        if data.nrows() == 0 {
            return Err(FilterError::ShapeMismatch {
                expected: (1, data.ncols()),
                actual: (data.nrows(), data.ncols()),
            });
        }
        self.means = Some(data.row_mean());

        Ok(())
    }

    /// The cached per-column means, if configured
    #[inline(always)]
    pub fn means(&self) -> Option<&RowDVector<f64>> {
        self.means.as_ref()
    }

    fn shift(&self, data: &DMatrix<f64>, sign: f64) -> Result<DMatrix<f64>, FilterError> {
        let means = self.means.as_ref().ok_or(FilterError::Unconfigured)?;
        if data.ncols() != means.ncols() {
            return Err(FilterError::ShapeMismatch {
                expected: (data.nrows(), means.ncols()),
                actual: (data.nrows(), data.ncols()),
            });
        }
        Ok(DMatrix::from_fn(data.nrows(), data.ncols(), |i, j| {
            data[(i, j)] + sign * means[j]
        }))
    }
}

impl Filter for MeanCenter {
    fn transform(&self, predictors: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
        self.shift(predictors, -1.0)
    }

    #[inline(always)]
    fn reset(&mut self) {
        self.means = None;
    }

    #[inline(always)]
    fn is_configured(&self) -> bool {
        self.means.is_some()
    }

    #[inline(always)]
    fn is_invertible(&self) -> bool {
        true
    }

    fn inverse_transform(&self, data: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
        self.shift(data, 1.0)
    }
}

impl ResponseFilter for MeanCenter {
    fn transform_response(&self, response: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
        self.transform(response)
    }
}
