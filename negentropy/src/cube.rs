use nalgebra::{DMatrix, DVector};

use super::Contrast;

/// The cubic nonlinearity, G(x) = x^3
///
/// Cheap to evaluate but sensitive to outliers, best suited for
/// sub-gaussian sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cube;

impl Contrast for Cube {
    fn apply(&self, x: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
        let value = x.map(|v| v.powi(3));
        let derivative = x.map(|v| 3.0 * v * v).column_mean();

        (value, derivative)
    }
}
