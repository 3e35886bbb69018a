//! Quantile summaries of one-dimensional posterior samples.
//!
//! [`param_range`] reports the median and the two-sided `alpha/2`,
//! `1 - alpha/2` quantiles of a flattened sample, ignoring `NaN` entries and
//! interpolating linearly between order statistics (position `h = (n - 1)·q`).
//! [`fmt_param_range`] renders the same triple as `"{median} ({lower} to {upper})"`.
use crate::sampling::errors::{SamplingError, SamplingResult};
use ndarray::{ArrayView, Dimension};

/// `(median, lower, upper)` of a one-dimensional sample.
///
/// # Errors
/// - `SamplingError::NotOneDimensional` unless `sample.ndim() == 1`.
/// - `SamplingError::InvalidAlpha` unless `0 < alpha < 1`.
/// - `SamplingError::EmptySample` if every entry is `NaN`.
pub fn param_range<D: Dimension>(sample: ArrayView<f64, D>, alpha: f64) -> SamplingResult<(f64, f64, f64)> {
    if sample.ndim() != 1 {
        return Err(SamplingError::NotOneDimensional { ndim: sample.ndim() });
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(SamplingError::InvalidAlpha { alpha });
    }
    let mut sorted: Vec<f64> = sample.iter().copied().filter(|x| !x.is_nan()).collect();
    if sorted.is_empty() {
        return Err(SamplingError::EmptySample);
    }
    sorted.sort_by(f64::total_cmp);
    Ok((
        quantile_sorted(&sorted, 0.5),
        quantile_sorted(&sorted, alpha / 2.0),
        quantile_sorted(&sorted, 1.0 - alpha / 2.0),
    ))
}

/// [`param_range`] rendered with `precision` decimals.
///
/// Non-negative numbers carry a leading space so columns of summaries line
/// up with negative ones.
///
/// # Errors
/// Any [`param_range`] error, or `SamplingError::InvalidPrecision` for
/// `precision == 0`.
pub fn fmt_param_range<D: Dimension>(
    sample: ArrayView<f64, D>, alpha: f64, precision: usize,
) -> SamplingResult<String> {
    if precision == 0 {
        return Err(SamplingError::InvalidPrecision { precision });
    }
    let (be, lb, ub) = param_range(sample, alpha)?;
    Ok(format!(
        "{} ({} to {})",
        fmt_signed(be, precision),
        fmt_signed(lb, precision),
        fmt_signed(ub, precision)
    ))
}

fn fmt_signed(x: f64, precision: usize) -> String {
    let sign = if x.is_sign_negative() { "" } else { " " };
    format!("{sign}{x:.precision$}")
}

// `sorted` is non-empty and ascending; `q ∈ [0, 1]`.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2, array};
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, StandardNormal};

    #[test]
    // Purpose
    // -------
    // Quantiles interpolate linearly between order statistics.
    //
    // Given
    // -----
    // - The integers 0..=100, alpha = 0.1.
    //
    // Expect
    // ------
    // - (50, 5, 95); for 0..=9 the median interpolates to 4.5.
    fn interpolated_quantiles() {
        let x = Array1::from_shape_fn(101, |i| i as f64);
        let (median, lower, upper) = param_range(x.view(), 0.1).expect("range");
        assert_relative_eq!(median, 50.0);
        assert_relative_eq!(lower, 5.0, epsilon = 1e-9);
        assert_relative_eq!(upper, 95.0, epsilon = 1e-9);

        let y = Array1::from_shape_fn(10, |i| i as f64);
        let (median, lower, upper) = param_range(y.view(), 0.5).expect("range");
        assert_relative_eq!(median, 4.5);
        assert_relative_eq!(lower, 2.25);
        assert_relative_eq!(upper, 6.75);
    }

    #[test]
    fn symmetric_sample_is_ordered() {
        let mut rng = StdRng::seed_from_u64(12);
        let x: Array1<f64> = Array1::from_shape_fn(5000, |_| StandardNormal.sample(&mut rng));
        let (median, lower, upper) = param_range(x.view(), 0.05).expect("range");
        assert!(lower < median && median < upper);
        assert!(median.abs() < 0.1);
        assert_relative_eq!(upper, 1.96, epsilon = 0.15);
        assert_relative_eq!(lower, -1.96, epsilon = 0.15);
    }

    #[test]
    fn nan_entries_are_ignored() {
        let x = array![f64::NAN, 1.0, 2.0, f64::NAN, 3.0];
        assert_eq!(param_range(x.view(), 0.5).expect("range").0, 2.0);
        assert_eq!(
            param_range(array![f64::NAN, f64::NAN].view(), 0.5),
            Err(SamplingError::EmptySample)
        );
    }

    #[test]
    fn rejects_bad_alpha_and_dimensionality() {
        let x = array![1.0, 2.0, 3.0];
        assert_eq!(param_range(x.view(), 0.0), Err(SamplingError::InvalidAlpha { alpha: 0.0 }));
        assert_eq!(param_range(x.view(), 1.0), Err(SamplingError::InvalidAlpha { alpha: 1.0 }));
        assert!(matches!(param_range(x.view(), f64::NAN), Err(SamplingError::InvalidAlpha { .. })));
        let m = Array2::<f64>::zeros((3, 2));
        assert_eq!(param_range(m.view(), 0.1), Err(SamplingError::NotOneDimensional { ndim: 2 }));
    }

    #[test]
    fn formatting_pads_non_negative_values() {
        let x = Array1::from_shape_fn(101, |i| i as f64);
        assert_eq!(fmt_param_range(x.view(), 0.1, 2).expect("fmt"), " 50.00 ( 5.00 to  95.00)");

        let y = array![-3.0, -2.0, -1.0];
        assert_eq!(fmt_param_range(y.view(), 0.5, 1).expect("fmt"), "-2.0 (-2.5 to -1.5)");

        assert_eq!(
            fmt_param_range(x.view(), 0.1, 0),
            Err(SamplingError::InvalidPrecision { precision: 0 })
        );
    }
}
