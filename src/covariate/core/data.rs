//! Data containers binding an observed series to its covariate.
//!
//! Purpose
//! -------
//! Provide a small, validated container pairing the observations a model is
//! fitted on with the covariate values that drive its parameters. All input
//! validation for raw data happens here, once, so the likelihood code can
//! iterate both series in lockstep without re-checking.
//!
//! Invariants & assumptions
//! ------------------------
//! - `values.len() == cov.len() > 0`.
//! - Every entry in both series is finite.
//! - The container is immutable once bound to a model.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, empty input, length mismatch and the
//!   first-offender reporting for non-finite entries, plus the summary
//!   statistics used by initial guesses.
use crate::covariate::errors::{ModelError, ModelResult};
use ndarray::Array1;

/// `CovariateData`: validated observations plus aligned covariate values.
///
/// Fields
/// ------
/// - `values`: `Array1<f64>`
///   Observations the likelihood is evaluated on.
/// - `cov`: `Array1<f64>`
///   Covariate value for each observation (same length as `values`).
#[derive(Debug, Clone, PartialEq)]
pub struct CovariateData {
    pub values: Array1<f64>,
    pub cov: Array1<f64>,
}

impl CovariateData {
    /// Construct a validated [`CovariateData`] from raw series.
    ///
    /// Errors
    /// ------
    /// - `ModelError::EmptySeries` when `values` is empty.
    /// - `ModelError::LengthMismatch` when the two lengths differ.
    /// - `ModelError::NonFiniteData` / `ModelError::NonFiniteCovariate` for
    ///   the first NaN/±∞ entry in either series.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_distcov::covariate::core::data::CovariateData;
    /// let data = CovariateData::new(array![1.0, 2.0, 3.0], array![0.0, 0.5, 1.0]).unwrap();
    /// assert_eq!(data.len(), 3);
    /// ```
    pub fn new(values: Array1<f64>, cov: Array1<f64>) -> ModelResult<Self> {
        if values.is_empty() {
            return Err(ModelError::EmptySeries);
        }
        if values.len() != cov.len() {
            return Err(ModelError::LengthMismatch { values: values.len(), cov: cov.len() });
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteData { index, value });
            }
        }
        for (index, &value) in cov.iter().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteCovariate { index, value });
            }
        }
        Ok(CovariateData { values, cov })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a validated container.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample mean of the observations.
    pub fn mean(&self) -> f64 {
        self.values.mean().unwrap_or(f64::NAN)
    }

    /// Population standard deviation (`ddof = 0`) of the observations.
    pub fn std(&self) -> f64 {
        self.values.std(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn new_accepts_aligned_finite_series() {
        let data = CovariateData::new(array![1.0, 2.0], array![0.1, 0.2]).expect("valid data");
        assert_eq!(data.len(), 2);
        assert!(!data.is_empty());
    }

    #[test]
    fn new_rejects_empty_and_mismatched_series() {
        assert_eq!(
            CovariateData::new(Array1::zeros(0), Array1::zeros(0)),
            Err(ModelError::EmptySeries)
        );
        assert_eq!(
            CovariateData::new(array![1.0, 2.0], array![0.0]),
            Err(ModelError::LengthMismatch { values: 2, cov: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // The first non-finite entry is reported with its index, data before
    // covariate.
    fn new_reports_first_non_finite_entry() {
        assert!(matches!(
            CovariateData::new(array![1.0, f64::NAN, f64::INFINITY], array![0.0, 0.0, 0.0]),
            Err(ModelError::NonFiniteData { index: 1, .. })
        ));
        assert!(matches!(
            CovariateData::new(array![1.0, 2.0], array![0.0, f64::NEG_INFINITY]),
            Err(ModelError::NonFiniteCovariate { index: 1, .. })
        ));
    }

    #[test]
    fn summary_statistics_use_population_std() {
        let data = CovariateData::new(array![1.0, 2.0, 3.0, 4.0], Array1::zeros(4)).expect("valid");
        assert_relative_eq!(data.mean(), 2.5);
        assert_relative_eq!(data.std(), 1.25_f64.sqrt(), epsilon = 1e-12);
    }
}
