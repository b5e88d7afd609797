use nalgebra::{DMatrix, DVector};

use super::Contrast;

/// The gaussian-kernel nonlinearity, G(x) = x * exp(-x^2 / 2)
///
/// Robust against outliers thanks to the decaying tails, the usual choice
/// when sources are strongly super-gaussian.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exponential;

impl Contrast for Exponential {
    fn apply(&self, x: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
        let value = x.map(|v| v * (-v * v / 2.0).exp());
        let derivative = x.map(|v| (1.0 - v * v) * (-v * v / 2.0).exp()).column_mean();

        (value, derivative)
    }
}
