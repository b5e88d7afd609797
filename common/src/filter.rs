use nalgebra::DMatrix;

use crate::FilterError;

/// A stateful preprocessing filter over predictor matrices
///
/// Instances move between two states: unconfigured and configured. A
/// successful configuration call of the concrete type caches the derived
/// operator; [`Filter::reset`] drops it again. Changing a hyperparameter
/// through a setter also drops it, so stale operators never survive a
/// parameter change.
pub trait Filter {
    /// Apply the cached operator to new predictor data
    ///
    /// # Arguments:
    /// predictors: A matrix with one row per sample
    ///
    /// # Returns:
    /// A freshly allocated matrix with the same number of rows as the input,
    /// or `FilterError::Unconfigured` if no operator has been cached yet
    fn transform(&self, predictors: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError>;

    /// Discard the cached derived state, returning to unconfigured
    fn reset(&mut self);

    /// Whether derived state is currently cached
    fn is_configured(&self) -> bool;

    /// Whether this filter supports reversing its transform
    ///
    /// Callers must query this instead of assuming invertibility.
    #[inline(always)]
    fn is_invertible(&self) -> bool {
        false
    }

    /// Reverse a previous transform
    fn inverse_transform(&self, _data: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
        Err(FilterError::NonInvertible)
    }
}

/// A filter whose operator is derived from predictors together with a
/// response matrix
pub trait SupervisedFilter: Filter {
    /// Validate shapes and cache the derived operator
    ///
    /// # Arguments:
    /// predictors: A matrix with one row per sample
    /// response: The response data the operator is derived against
    fn initialize(
        &mut self,
        predictors: &DMatrix<f64>,
        response: &DMatrix<f64>,
    ) -> Result<(), FilterError>;
}

/// A filter that also applies to response matrices, used to undo scaling on
/// predictions
pub trait ResponseFilter {
    /// Apply the cached operator to response data
    fn transform_response(&self, response: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError>;
}
