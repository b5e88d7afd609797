use common::{Filter, FilterError, SupervisedFilter};
use nalgebra::DMatrix;

use crate::weighting::{apply_projection, center_columns, projection_from_covariance};

/// Generalized least squares weighting
///
/// Given two measurements of the same samples under different conditions,
/// builds a symmetric projection matrix that damps the directions in which
/// the two conditions disagree. `alpha` controls the filter strength: the
/// smaller it gets, the harder high-interference directions are pushed
/// towards zero.
#[derive(Debug, Clone)]
pub struct Glsw {
    alpha: f64,
    projection: Option<DMatrix<f64>>,
}

impl Glsw {
    /// Create a new, unconfigured GLSW filter
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
    /// Non-positive values are ignored with a warning; the previous valid
    /// value and the cached projection both stay in place in that case.
    pub fn set_alpha(&mut self, alpha: f64) {
        if alpha <= 0.0 {
            warn!("ignoring non-positive alpha {}, keeping {}", alpha, self.alpha);
            return;
        }
        self.alpha = alpha;
        self.projection = None;
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

        let xd = center_columns(x2)? - center_columns(x1)?;
        let cov = xd.transpose() * &xd;
        self.projection = Some(projection_from_covariance(&cov, self.alpha)?);

        debug!("glsw configured, projection dims: ({}, {})", xd.ncols(), xd.ncols());

        Ok(())
    }

    /// The cached projection matrix, if configured
    #[inline(always)]
    pub fn projection(&self) -> Option<&DMatrix<f64>> {
        self.projection.as_ref()
    }
}

impl Filter for Glsw {
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

impl SupervisedFilter for Glsw {
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

#[cfg(test)]
mod tests {
    use nalgebra::{Dim, Matrix};
    use round::round;

    use super::*;

    fn replicates() -> (DMatrix<f64>, DMatrix<f64>) {
        let x1: DMatrix<f64> = Matrix::from_vec_generic(
            Dim::from_usize(4),
            Dim::from_usize(3),
            vec![
                1.0, 2.0, 3.0, 4.0, 0.5, 1.5, 2.5, 3.5, -1.0, 0.0, 1.0, 2.0,
            ],
        );
        let x2: DMatrix<f64> = Matrix::from_vec_generic(
            Dim::from_usize(4),
            Dim::from_usize(3),
            vec![
                1.2, 1.9, 3.3, 3.8, 0.4, 1.8, 2.3, 3.7, -0.9, -0.3, 1.4, 1.9,
            ],
        );
        (x1, x2)
    }

    #[test]
    fn glsw_projection_is_symmetric() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x1, x2) = replicates();
        let mut glsw = Glsw::new(0.02).unwrap();
        glsw.configure(&x1, &x2).unwrap();

        let g = glsw.projection().unwrap();
        info!("projection: {}", g);

        let mut g_t = g.transpose();
        let mut g = g.clone();
        g.iter_mut().for_each(|v| *v = round(*v, 9));
        g_t.iter_mut().for_each(|v| *v = round(*v, 9));

        assert_eq!(g, g_t);
    }

    #[test]
    fn glsw_identical_replicates_pass_through() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x1, _) = replicates();
        let mut glsw = Glsw::new(0.5).unwrap();
        glsw.configure(&x1, &x1).unwrap();

        // zero difference means zero covariance, so nothing gets filtered
        let mut transformed = glsw.transform(&x1).unwrap();
        transformed.iter_mut().for_each(|v| *v = round(*v, 9));

        assert_eq!(transformed, x1);
    }

    #[test]
    fn glsw_shape_mismatch_leaves_unconfigured() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x1, _) = replicates();
        let x2: DMatrix<f64> = Matrix::from_vec_generic(
            Dim::from_usize(2),
            Dim::from_usize(3),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );

        let mut glsw = Glsw::new(0.02).unwrap();
        assert_eq!(
            glsw.configure(&x1, &x2),
            Err(FilterError::ShapeMismatch {
                expected: (4, 3),
                actual: (2, 3),
            })
        );
        assert!(!glsw.is_configured());
        assert_eq!(glsw.transform(&x1), Err(FilterError::Unconfigured));
    }

    #[test]
    fn glsw_reset_forces_reconfiguration() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x1, x2) = replicates();
        let mut glsw = Glsw::new(0.02).unwrap();
        glsw.configure(&x1, &x2).unwrap();
        assert!(glsw.is_configured());

        glsw.reset();
        assert_eq!(glsw.transform(&x1), Err(FilterError::Unconfigured));
    }

    #[test]
    fn glsw_alpha_setter_invalidates_state() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x1, x2) = replicates();
        let mut glsw = Glsw::new(0.02).unwrap();
        glsw.configure(&x1, &x2).unwrap();

        glsw.set_alpha(0.1);
        assert_eq!(glsw.alpha(), 0.1);
        assert_eq!(glsw.transform(&x1), Err(FilterError::Unconfigured));

        glsw.configure(&x1, &x2).unwrap();
        assert!(glsw.is_configured());
    }

    #[test]
    fn glsw_rejects_invalid_alpha_softly() {
        if let Err(_) = pretty_env_logger::try_init() {}

        assert_eq!(
            Glsw::new(0.0).err(),
            Some(FilterError::ParameterRange {
                name: "alpha",
                value: 0.0,
            })
        );

        let (x1, x2) = replicates();
        let mut glsw = Glsw::new(0.02).unwrap();
        glsw.configure(&x1, &x2).unwrap();

        // invalid update keeps the previous value and the cached projection
        glsw.set_alpha(-1.0);
        assert_eq!(glsw.alpha(), 0.02);
        assert!(glsw.is_configured());
    }

    #[test]
    fn glsw_declares_non_invertible() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x1, x2) = replicates();
        let mut glsw = Glsw::new(0.02).unwrap();
        glsw.configure(&x1, &x2).unwrap();

        assert!(!glsw.is_invertible());
        assert_eq!(glsw.inverse_transform(&x1), Err(FilterError::NonInvertible));
    }

    #[test]
    fn glsw_supervised_initialize() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x1, x2) = replicates();
        let mut glsw = Glsw::new(0.02).unwrap();
        glsw.initialize(&x1, &x2).unwrap();
        assert!(glsw.is_configured());
    }
}
