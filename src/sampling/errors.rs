//! Errors for ensemble sampling and posterior summaries.
//!
//! [`SamplingError`] covers sampler configuration, walker position shapes,
//! failures of the seeding fit (wrapped [`OptError`]) and invalid summary
//! requests. Sampling itself never fails once configured: walkers that land
//! outside the support simply have their proposals rejected.
use crate::optimization::errors::OptError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for sampling and summary operations.
pub type SamplingResult<T> = Result<T, SamplingError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    // ---- Sampler configuration ----
    /// Need at least two walkers and at least twice as many walkers as parameters.
    InvalidWalkerCount { n_walkers: usize, n_dim: usize },

    /// Step count must be positive.
    InvalidSteps { steps: usize, reason: &'static str },

    /// Stretch-move scale must be finite and > 1.
    InvalidStretchScale { value: f64 },

    /// Initial ball standard deviation must be finite and > 0.
    InvalidBallScale { value: f64 },

    /// Walker positions do not match `(n_walkers, n_dim)`.
    PositionsShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    // ---- Seeding fit ----
    /// The maximum-likelihood fit used to seed the walkers failed.
    Fit(OptError),

    // ---- Posterior summary ----
    /// Quantile summaries need a one-dimensional sample.
    NotOneDimensional { ndim: usize },

    /// Credible level must lie strictly between 0 and 1.
    InvalidAlpha { alpha: f64 },

    /// Formatting precision must be at least one decimal.
    InvalidPrecision { precision: usize },

    /// Sample has no non-NaN values.
    EmptySample,
}

impl std::error::Error for SamplingError {}

impl std::fmt::Display for SamplingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingError::InvalidWalkerCount { n_walkers, n_dim } => write!(
                f,
                "Invalid walker count {n_walkers}: need at least 2 and at least 2 x {n_dim} parameters"
            ),
            SamplingError::InvalidSteps { steps, reason } => {
                write!(f, "Invalid number of steps {steps}: {reason}")
            }
            SamplingError::InvalidStretchScale { value } => {
                write!(f, "Stretch scale must be finite and > 1, got {value}")
            }
            SamplingError::InvalidBallScale { value } => {
                write!(f, "Initial ball scale must be finite and > 0, got {value}")
            }
            SamplingError::PositionsShapeMismatch { expected, actual } => write!(
                f,
                "Walker positions have shape {actual:?}, expected {expected:?}"
            ),
            SamplingError::Fit(err) => write!(f, "Initial fit failed: {err}"),
            SamplingError::NotOneDimensional { ndim } => {
                write!(f, "Expected a one-dimensional sample, got {ndim} dimensions")
            }
            SamplingError::InvalidAlpha { alpha } => {
                write!(f, "alpha must lie in (0, 1), got {alpha}")
            }
            SamplingError::InvalidPrecision { precision } => {
                write!(f, "precision must be an integer >= 1, got {precision}")
            }
            SamplingError::EmptySample => write!(f, "Sample contains no non-NaN values"),
        }
    }
}

impl From<OptError> for SamplingError {
    fn from(err: OptError) -> Self {
        SamplingError::Fit(err)
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<SamplingError> for PyErr {
    fn from(err: SamplingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
