use nalgebra::{DMatrix, DVector};

use super::Contrast;

/// The log-cosh nonlinearity, G(x) = tanh(alpha * x)
///
/// A good general-purpose contrast. `alpha` scales the slope of the tanh;
/// values near zero flatten the derivative and weaken the contrast, which
/// is a modeling concern rather than an error.
#[derive(Debug, Clone, Copy)]
pub struct LogCosh {
    alpha: f64,
}

impl Default for LogCosh {
    fn default() -> Self {
        Self {
            alpha: 1.0,
        }
    }
}

impl LogCosh {
    /// Create a new log-cosh contrast with the given slope
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
        }
    }

    /// The tanh slope
    #[inline(always)]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Set the tanh slope, taking effect on the next `apply`
    #[inline(always)]
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }
}

impl Contrast for LogCosh {
    fn apply(&self, x: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
        let alpha = self.alpha;
        let value = x.map(|v| (alpha * v).tanh());
        let derivative = x
            .map(|v| {
                let t = (alpha * v).tanh();
                alpha * (1.0 - t * t)
            })
            .column_mean();

        (value, derivative)
    }
}
