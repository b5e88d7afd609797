use thiserror::Error;

/// The errors a preprocessing filter can surface to its caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The supplied matrices do not satisfy the shape precondition of the
    /// algorithm
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The shape the algorithm required
        expected: (usize, usize),
        /// The shape it was given
        actual: (usize, usize),
    },

    /// `transform` was called before a successful `configure`
    #[error("filter has not been configured")]
    Unconfigured,

    /// A hyperparameter is outside its valid range
    #[error("parameter {name} out of range: {value}")]
    ParameterRange {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// An inverse transform was requested from a filter that declares itself
    /// non-invertible
    #[error("filter is not invertible")]
    NonInvertible,

    /// An eigen or singular value decomposition did not converge
    #[error("decomposition failed: {0}")]
    Decomposition(&'static str),
}
