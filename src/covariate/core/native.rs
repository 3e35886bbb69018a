//! Native distribution parameters produced by a covariate transform.
//!
//! A transform maps a raw parameter vector and a covariate series to the
//! (shape, location, scale) of the base family at every observation, or to
//! the [`NativeParams::Unsupported`] tag when the implied parameters leave
//! the family's support.
//!
//! Location and scale vectors either match the number of evaluation points
//! or have length 1, in which case they broadcast.
use crate::covariate::core::family::{Family, NativePoint};
use ndarray::{Array1, ArrayView1};

/// Result of mapping `θ` and a covariate series to native parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeParams {
    Supported { shape: Option<f64>, loc: Array1<f64>, scale: Array1<f64> },
    Unsupported,
}

impl NativeParams {
    pub fn is_supported(&self) -> bool {
        matches!(self, NativeParams::Supported { .. })
    }

    /// Native point at evaluation index `i`, broadcasting length-1 vectors.
    ///
    /// Returns `None` for the unsupported tag or an index out of range.
    pub fn point(&self, i: usize) -> Option<NativePoint> {
        match self {
            NativeParams::Supported { shape, loc, scale } => Some(NativePoint {
                shape: *shape,
                loc: broadcast(loc, i)?,
                scale: broadcast(scale, i)?,
            }),
            NativeParams::Unsupported => None,
        }
    }

    /// `Σᵢ logpdf(xᵢ)` over `values`, pairing observation `i` with point `i`.
    ///
    /// Returns `NaN` for the unsupported tag or when the native vectors can
    /// neither broadcast nor align with `values`; callers collapse `NaN`
    /// to `-∞`.
    pub fn log_density_sum(&self, family: Family, values: ArrayView1<f64>) -> f64 {
        let mut total = 0.0;
        for (i, &x) in values.iter().enumerate() {
            match self.point(i) {
                Some(point) => total += family.logpdf(x, point),
                None => return f64::NAN,
            }
        }
        total
    }
}

fn broadcast(v: &Array1<f64>, i: usize) -> Option<f64> {
    if v.len() == 1 { v.first().copied() } else { v.get(i).copied() }
}
