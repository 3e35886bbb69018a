//! Walker initialization around a point estimate.
use crate::sampling::errors::{SamplingError, SamplingResult};
use ndarray::{Array2, ArrayView1};
use rand::Rng;
use rand_distr::StandardNormal;

/// Draw `n_walkers` positions as `center + std ⊙ N(0, I)`.
///
/// `std` is an absolute per-coordinate standard deviation and must have the
/// same length as `center`.
///
/// # Errors
/// - `SamplingError::PositionsShapeMismatch` if `std.len() != center.len()`.
/// - `SamplingError::InvalidBallScale` for a non-finite or non-positive entry.
pub fn sample_ball<R: Rng + ?Sized>(
    center: ArrayView1<f64>, std: ArrayView1<f64>, n_walkers: usize, rng: &mut R,
) -> SamplingResult<Array2<f64>> {
    if std.len() != center.len() {
        return Err(SamplingError::PositionsShapeMismatch {
            expected: (1, center.len()),
            actual: (1, std.len()),
        });
    }
    if let Some(&bad) = std.iter().find(|s| !s.is_finite() || **s <= 0.0) {
        return Err(SamplingError::InvalidBallScale { value: bad });
    }
    Ok(Array2::from_shape_fn((n_walkers, center.len()), |(_, j)| {
        center[j] + std[j] * rng.sample::<f64, _>(StandardNormal)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Axis, array};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn ball_is_tight_around_center() {
        let mut rng = StdRng::seed_from_u64(4);
        let center = array![1.0, -3.0, 250.0];
        let std = array![1e-4, 1e-4, 1e-4];
        let p0 = sample_ball(center.view(), std.view(), 500, &mut rng).expect("ball");
        assert_eq!(p0.dim(), (500, 3));
        let mean = p0.mean_axis(Axis(0)).expect("non-empty");
        for j in 0..3 {
            assert!((mean[j] - center[j]).abs() < 2e-5);
            assert!(p0.column(j).iter().all(|x| (x - center[j]).abs() < 1e-3));
        }
        assert!(p0.column(0).iter().any(|&x| x != 1.0));
    }

    #[test]
    fn rejects_bad_std() {
        let mut rng = StdRng::seed_from_u64(0);
        let center = array![0.0, 0.0];
        assert_eq!(
            sample_ball(center.view(), array![1e-4, 0.0].view(), 4, &mut rng),
            Err(SamplingError::InvalidBallScale { value: 0.0 })
        );
        assert!(matches!(
            sample_ball(center.view(), array![1e-4].view(), 4, &mut rng),
            Err(SamplingError::PositionsShapeMismatch { .. })
        ));
    }
}
