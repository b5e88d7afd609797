//! Negative-entropy approximation functions for iterative source separation

#![deny(unused_imports, unused_crate_dependencies)]
#![warn(missing_docs)]

use nalgebra::{DMatrix, DVector};

mod cube;
mod exponential;
mod log_cosh;

pub use cube::Cube;
pub use exponential::Exponential;
pub use log_cosh::LogCosh;

/// Generic way of approximating negative entropy inside a fixed-point
/// source extraction iteration
pub trait Contrast: Clone {
    /// Evaluate the nonlinearity and its derivative estimate
    ///
    /// # Arguments:
    /// x: Input data with one row per sample and one column per feature
    ///
    /// # Returns:
    /// The elementwise function value, together with the per-row mean of the
    /// derivative as a column vector of length `x.nrows()`
    fn apply(&self, x: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>);
}
