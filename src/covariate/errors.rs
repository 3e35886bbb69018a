//! Errors for covariate-conditioned models (data binding, prior and
//! constraint validation).
//!
//! This module defines the model error type, [`ModelError`], used by
//! [`CovariateData`](crate::covariate::core::data::CovariateData),
//! [`Prior`](crate::covariate::core::prior::Prior) and the model
//! constructors. It implements `Display`/`Error` and, with the
//! `python-bindings` feature, converts to `PyErr`.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Numerical trouble during likelihood evaluation is *not* an error here;
//!   it is absorbed as a `-∞` log-likelihood. Only structural problems
//!   (bad inputs at construction time) surface as [`ModelError`].
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for model construction paths that may produce [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for covariate model construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Input/data validation ----
    /// Series is empty.
    EmptySeries,

    /// Data and covariate series differ in length.
    LengthMismatch { values: usize, cov: usize },

    /// A data point is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// A covariate value is NaN/±inf.
    NonFiniteCovariate { index: usize, value: f64 },

    // ---- Prior / constraint validation ----
    /// Shape constraint must be finite and non-negative.
    InvalidShapeConstraint { value: f64 },

    /// Gaussian prior standard deviation must be finite and > 0.
    InvalidPriorScale { value: f64 },

    /// Gaussian prior refers to a coordinate outside the parameter vector.
    InvalidPriorIndex { index: usize, n_params: usize },
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::EmptySeries => write!(f, "Data series must not be empty."),
            ModelError::LengthMismatch { values, cov } => {
                write!(f, "Data has {values} observations but the covariate has {cov}")
            }
            ModelError::NonFiniteData { index, value } => {
                write!(f, "Non-finite data value at index {index}: {value}")
            }
            ModelError::NonFiniteCovariate { index, value } => {
                write!(f, "Non-finite covariate value at index {index}: {value}")
            }
            ModelError::InvalidShapeConstraint { value } => {
                write!(f, "Shape constraint must be finite and >= 0, got {value}")
            }
            ModelError::InvalidPriorScale { value } => {
                write!(f, "Prior standard deviation must be finite and > 0, got {value}")
            }
            ModelError::InvalidPriorIndex { index, n_params } => {
                write!(f, "Prior index {index} out of range for {n_params} parameters")
            }
        }
    }
}

/// Convert a [`ModelError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
