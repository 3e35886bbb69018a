//! Conversion helpers shared by the Python bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature. The
//! helpers turn loosely typed Python inputs (numpy arrays, pandas Series,
//! sequences, optional keyword arguments) into validated crate types and
//! forward to the generic [`CovariateModel`] surface so each Python class in
//! `lib.rs` stays a thin shim.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    covariate::{CovariateData, CovariateModel},
    optimization::loglik_optimizer::{MLEOptions, SimplexSteps, Tolerances},
    sampling::{McmcOptions, PosteriorEnsemble, run_mcmc},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArray1,
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D array-like into an owned `Array1<f64>`; `name` labels errors.
#[cfg(feature = "python-bindings")]
pub fn extract_array1<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

#[cfg(feature = "python-bindings")]
pub fn extract_covariate_data<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, cov: &Bound<'py, PyAny>,
) -> PyResult<CovariateData> {
    let values = extract_array1(py, data, "data")?;
    let cov = extract_array1(py, cov, "cov")?;
    Ok(CovariateData::new(values, cov)?)
}

/// Optimizer options from optional keyword arguments.
///
/// `tol_cost` defaults to `1e-5` only when neither stopping rule is given.
#[cfg(feature = "python-bindings")]
pub fn extract_mle_opts(
    tol_cost: Option<f64>, max_iter: Option<usize>, verbose: Option<bool>,
) -> PyResult<MLEOptions> {
    let tols = match (tol_cost, max_iter) {
        (None, None) => Tolerances::default(),
        (tol, iters) => Tolerances::new(tol, iters)?,
    };
    Ok(MLEOptions::new(tols, SimplexSteps::default(), verbose.unwrap_or(false)))
}

#[cfg(feature = "python-bindings")]
pub fn build_mcmc_opts(
    n_walkers: Option<usize>, burn_in: Option<usize>, production: Option<usize>,
    verbose: Option<bool>, seed: Option<u64>, mle_opts: MLEOptions,
) -> McmcOptions {
    let defaults = McmcOptions::default();
    McmcOptions {
        n_walkers: n_walkers.unwrap_or(defaults.n_walkers),
        burn_in: burn_in.unwrap_or(defaults.burn_in),
        production: production.unwrap_or(defaults.production),
        verbose: verbose.unwrap_or(defaults.verbose),
        seed,
        mle_opts,
        ..defaults
    }
}

// ---- Generic forwarding used by every model class ----

#[cfg(feature = "python-bindings")]
pub fn model_fit<M: CovariateModel>(
    model: &M, tol_cost: Option<f64>, max_iter: Option<usize>,
) -> PyResult<Vec<f64>> {
    let opts = extract_mle_opts(tol_cost, max_iter, None)?;
    Ok(model.fit_with(&opts)?.to_vec())
}

#[cfg(feature = "python-bindings")]
pub fn model_loglike<'py, M: CovariateModel>(
    py: Python<'py>, model: &M, theta: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let theta = extract_array1(py, theta, "theta")?;
    Ok(model.loglike(theta.view()))
}

#[cfg(feature = "python-bindings")]
pub fn model_predict<'py, M: CovariateModel>(
    py: Python<'py>, model: &M, theta: &Bound<'py, PyAny>, cov: f64,
) -> PyResult<f64> {
    let theta = extract_array1(py, theta, "theta")?;
    Ok(model.predict(theta.view(), cov))
}

/// Distribution query selected by name: `cdf`, `sf`, `ppf` or `isf`.
#[cfg(feature = "python-bindings")]
pub fn model_query<'py, M: CovariateModel>(
    py: Python<'py>, model: &M, which: &str, at: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>,
    cov: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let at = extract_array1(py, at, "x")?;
    let theta = extract_array1(py, theta, "theta")?;
    let out = match which {
        "cdf" => model.cdf(at.view(), theta.view(), cov),
        "sf" => model.sf(at.view(), theta.view(), cov),
        "ppf" => model.ppf(at.view(), theta.view(), cov),
        "isf" => model.isf(at.view(), theta.view(), cov),
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid query {:?} (expected 'cdf', 'sf', 'ppf', or 'isf')",
                other
            )));
        }
    };
    Ok(out.into_pyarray(py))
}

#[cfg(feature = "python-bindings")]
pub fn model_run_mcmc<M: CovariateModel>(
    py: Python<'_>, model: &M, opts: &McmcOptions,
) -> PyResult<PosteriorEnsemble> {
    // Walkers evaluate in rayon threads; release the GIL while they run.
    Ok(py.allow_threads(|| run_mcmc(model, opts))?)
}
