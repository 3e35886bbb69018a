//! rust_distcov: covariate-conditioned distributions with maximum-likelihood
//! fits and ensemble-MCMC posteriors.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and, behind the
//! `python-bindings` feature, as the PyO3 bridge exposing the models and
//! posterior summaries to Python through the `_rust_distcov` extension
//! module.
//!
//! Key behaviors
//! -------------
//! - [`covariate`] defines the data containers, base families (Normal, GEV),
//!   the [`CovariateModel`](covariate::CovariateModel) trait and its three
//!   variants.
//! - [`optimization`] provides the derivative-free Nelder–Mead maximizer the
//!   models fit with.
//! - [`sampling`] runs the affine-invariant ensemble sampler seeded at the
//!   fit, and summarizes marginals by median and credible bounds.
//! - With `python-bindings`, `#[pyclass]` wrappers and the `#[pymodule]`
//!   initializer register `models` and `summary` submodules.
//!
//! Invariants & assumptions
//! ------------------------
//! - Numerical work lives in the inner modules; this file performs only FFI
//!   glue, input conversion and error mapping.
//! - Crate errors convert to Python `ValueError` at the boundary.
//!
//! Conventions
//! -----------
//! - Parameter vectors cross the boundary as 1-D float sequences in each
//!   model's natural layout (`param_names`).
//! - Chains are returned as numpy arrays shaped `(steps, walkers, params)`.
//!
//! Downstream usage
//! ----------------
//! - Rust code depends on the inner modules directly and can ignore the
//!   items guarded by `python-bindings`.
//! - The Python package imports `_rust_distcov` and wraps its classes.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and an
//!   end-to-end integration test under `tests/`.

pub mod covariate;
pub mod optimization;
pub mod sampling;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2, PyArray3, PyReadonlyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    covariate::{CovariateModel, GevCov, NormCov, NormCovScale},
    sampling::{PosteriorEnsemble, summary},
    utils::{
        build_mcmc_opts, extract_covariate_data, extract_f64_array, extract_mle_opts, model_fit,
        model_loglike, model_predict, model_query, model_run_mcmc,
    },
};

/// NormCov: Normal distribution with location `b0 + b1·cov`.
///
/// Constructed from Python via `NormCov(data, cov)` with two aligned 1-D
/// float sequences. Parameters are `[b0, b1, scale]`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "NormCov", module = "rust_distcov.models")]
pub struct PyNormCov {
    inner: NormCov,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyNormCov {
    #[new]
    #[pyo3(text_signature = "(data, cov, /)")]
    pub fn new<'py>(py: Python<'py>, data: &Bound<'py, PyAny>, cov: &Bound<'py, PyAny>) -> PyResult<Self> {
        Ok(PyNormCov { inner: NormCov::new(extract_covariate_data(py, data, cov)?) })
    }

    #[getter]
    pub fn param_names(&self) -> Vec<String> {
        self.inner.param_names().iter().map(|n| n.to_string()).collect()
    }

    #[pyo3(signature = (tol_cost = None, max_iter = None))]
    pub fn fit(&self, tol_cost: Option<f64>, max_iter: Option<usize>) -> PyResult<Vec<f64>> {
        model_fit(&self.inner, tol_cost, max_iter)
    }

    pub fn loglike<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>) -> PyResult<f64> {
        model_loglike(py, &self.inner, theta)
    }

    pub fn predict<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>, cov: f64) -> PyResult<f64> {
        model_predict(py, &self.inner, theta, cov)
    }

    pub fn cdf<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "cdf", x, theta, cov)
    }

    pub fn sf<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "sf", x, theta, cov)
    }

    pub fn ppf<'py>(
        &self, py: Python<'py>, q: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "ppf", q, theta, cov)
    }

    pub fn isf<'py>(
        &self, py: Python<'py>, q: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "isf", q, theta, cov)
    }

    #[pyo3(
        signature = (
            n_walkers = None,
            burn_in = None,
            production = None,
            verbose = None,
            seed = None,
            tol_cost = None,
            max_iter = None,
        ),
        text_signature = "(self, /, n_walkers=50, burn_in=500, production=1000, verbose=True, \
                          seed=None, tol_cost=1e-5, max_iter=None)"
    )]
    pub fn run_mcmc(
        &self, py: Python<'_>, n_walkers: Option<usize>, burn_in: Option<usize>,
        production: Option<usize>, verbose: Option<bool>, seed: Option<u64>,
        tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> PyResult<PosteriorSamples> {
        let mle_opts = extract_mle_opts(tol_cost, max_iter, None)?;
        let opts = build_mcmc_opts(n_walkers, burn_in, production, verbose, seed, mle_opts);
        Ok(PosteriorSamples { inner: model_run_mcmc(py, &self.inner, &opts)? })
    }
}

/// NormCovScale: Normal distribution with location and scale both
/// multiplied by `exp(a·cov / loc0)`.
///
/// Constructed via `NormCovScale(data, cov)`. Parameters are
/// `[loc0, scale0, a]`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "NormCovScale", module = "rust_distcov.models")]
pub struct PyNormCovScale {
    inner: NormCovScale,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyNormCovScale {
    #[new]
    #[pyo3(text_signature = "(data, cov, /)")]
    pub fn new<'py>(py: Python<'py>, data: &Bound<'py, PyAny>, cov: &Bound<'py, PyAny>) -> PyResult<Self> {
        Ok(PyNormCovScale { inner: NormCovScale::new(extract_covariate_data(py, data, cov)?) })
    }

    #[getter]
    pub fn param_names(&self) -> Vec<String> {
        self.inner.param_names().iter().map(|n| n.to_string()).collect()
    }

    #[pyo3(signature = (tol_cost = None, max_iter = None))]
    pub fn fit(&self, tol_cost: Option<f64>, max_iter: Option<usize>) -> PyResult<Vec<f64>> {
        model_fit(&self.inner, tol_cost, max_iter)
    }

    pub fn loglike<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>) -> PyResult<f64> {
        model_loglike(py, &self.inner, theta)
    }

    pub fn predict<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>, cov: f64) -> PyResult<f64> {
        model_predict(py, &self.inner, theta, cov)
    }

    pub fn cdf<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "cdf", x, theta, cov)
    }

    pub fn sf<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "sf", x, theta, cov)
    }

    pub fn ppf<'py>(
        &self, py: Python<'py>, q: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "ppf", q, theta, cov)
    }

    pub fn isf<'py>(
        &self, py: Python<'py>, q: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "isf", q, theta, cov)
    }

    #[pyo3(signature = (
        n_walkers = None,
        burn_in = None,
        production = None,
        verbose = None,
        seed = None,
        tol_cost = None,
        max_iter = None,
    ))]
    pub fn run_mcmc(
        &self, py: Python<'_>, n_walkers: Option<usize>, burn_in: Option<usize>,
        production: Option<usize>, verbose: Option<bool>, seed: Option<u64>,
        tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> PyResult<PosteriorSamples> {
        let mle_opts = extract_mle_opts(tol_cost, max_iter, None)?;
        let opts = build_mcmc_opts(n_walkers, burn_in, production, verbose, seed, mle_opts);
        Ok(PosteriorSamples { inner: model_run_mcmc(py, &self.inner, &opts)? })
    }
}

/// GevCov: generalized extreme value distribution with location
/// `b0 + b1·cov`.
///
/// Constructed via `GevCov(data, cov, constraint=None)`. Parameters are
/// `[shape, b0, b1, scale]`; a positive `constraint` installs a zero-mean
/// Gaussian prior with standard deviation `constraint / 2` on `shape`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "GevCov", module = "rust_distcov.models")]
pub struct PyGevCov {
    inner: GevCov,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyGevCov {
    #[new]
    #[pyo3(signature = (data, cov, constraint = None), text_signature = "(data, cov, /, constraint=None)")]
    pub fn new<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, cov: &Bound<'py, PyAny>, constraint: Option<f64>,
    ) -> PyResult<Self> {
        let data = extract_covariate_data(py, data, cov)?;
        Ok(PyGevCov { inner: GevCov::new(data, constraint)? })
    }

    #[getter]
    pub fn param_names(&self) -> Vec<String> {
        self.inner.param_names().iter().map(|n| n.to_string()).collect()
    }

    #[pyo3(signature = (tol_cost = None, max_iter = None))]
    pub fn fit(&self, tol_cost: Option<f64>, max_iter: Option<usize>) -> PyResult<Vec<f64>> {
        model_fit(&self.inner, tol_cost, max_iter)
    }

    pub fn loglike<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>) -> PyResult<f64> {
        model_loglike(py, &self.inner, theta)
    }

    pub fn predict<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>, cov: f64) -> PyResult<f64> {
        model_predict(py, &self.inner, theta, cov)
    }

    pub fn cdf<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "cdf", x, theta, cov)
    }

    pub fn sf<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "sf", x, theta, cov)
    }

    pub fn ppf<'py>(
        &self, py: Python<'py>, q: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "ppf", q, theta, cov)
    }

    pub fn isf<'py>(
        &self, py: Python<'py>, q: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>, cov: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        model_query(py, &self.inner, "isf", q, theta, cov)
    }

    #[pyo3(signature = (
        n_walkers = None,
        burn_in = None,
        production = None,
        verbose = None,
        seed = None,
        tol_cost = None,
        max_iter = None,
    ))]
    pub fn run_mcmc(
        &self, py: Python<'_>, n_walkers: Option<usize>, burn_in: Option<usize>,
        production: Option<usize>, verbose: Option<bool>, seed: Option<u64>,
        tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> PyResult<PosteriorSamples> {
        let mle_opts = extract_mle_opts(tol_cost, max_iter, None)?;
        let opts = build_mcmc_opts(n_walkers, burn_in, production, verbose, seed, mle_opts);
        Ok(PosteriorSamples { inner: model_run_mcmc(py, &self.inner, &opts)? })
    }
}

/// PosteriorSamples: production chain returned by `run_mcmc`.
///
/// Instances are created by the model classes and are not constructed by
/// user code. Array getters copy into fresh numpy arrays.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_distcov.models")]
pub struct PosteriorSamples {
    pub inner: PosteriorEnsemble,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PosteriorSamples {
    /// `(production, n_walkers, n_params)`.
    #[getter]
    pub fn chain<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.chain.clone().into_pyarray(py)
    }

    /// `(production · n_walkers, n_params)`.
    #[getter]
    pub fn flatchain<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.flat_chain().into_pyarray(py)
    }

    #[getter]
    pub fn log_prob<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.log_prob.clone().into_pyarray(py)
    }

    #[getter]
    pub fn acceptance_fraction<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.acceptance_fraction.clone().into_pyarray(py)
    }

    #[getter]
    pub fn theta_mle(&self) -> Vec<f64> {
        self.inner.theta_mle.to_vec()
    }

    #[getter]
    pub fn param_names(&self) -> Vec<String> {
        self.inner.param_names.clone()
    }
}

/// `(median, lower, upper)` of a 1-D sample at credible level `1 - alpha`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (flatchain, alpha = 0.05))]
pub fn param_range<'py>(
    py: Python<'py>, flatchain: &Bound<'py, PyAny>, alpha: f64,
) -> PyResult<(f64, f64, f64)> {
    // n-d numpy input is passed through so the summary can reject it.
    if let Ok(arr) = flatchain.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(summary::param_range(arr.as_array(), alpha)?);
    }
    let arr = extract_f64_array(py, flatchain)?;
    Ok(summary::param_range(arr.as_array(), alpha)?)
}

/// `"{median} ({lower} to {upper})"` with `precision` decimals.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (flatchain, alpha = 0.05, precision = 3))]
pub fn fmt_param_range<'py>(
    py: Python<'py>, flatchain: &Bound<'py, PyAny>, alpha: f64, precision: usize,
) -> PyResult<String> {
    if let Ok(arr) = flatchain.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(summary::fmt_param_range(arr.as_array(), alpha, precision)?);
    }
    let arr = extract_f64_array(py, flatchain)?;
    Ok(summary::fmt_param_range(arr.as_array(), alpha, precision)?)
}

/// _rust_distcov: PyO3 module initializer for the Python extension.
///
/// Creates the `models` and `summary` submodules, attaches them to the
/// parent module and registers them in `sys.modules` so dotted imports
/// (`rust_distcov.models`) resolve.
///
/// # Errors
/// `PyErr` if creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_distcov<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let models_mod = PyModule::new(_py, "models")?;
    let summary_mod = PyModule::new(_py, "summary")?;
    models(_py, m, &models_mod)?;
    summary_functions(_py, m, &summary_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_distcov.models", models_mod)?;
    _py.import("sys")?.getattr("modules")?.set_item("rust_distcov.summary", summary_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn models<'py>(
    _py: Python, rust_distcov: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyNormCov>()?;
    m.add_class::<PyNormCovScale>()?;
    m.add_class::<PyGevCov>()?;
    m.add_class::<PosteriorSamples>()?;
    rust_distcov.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn summary_functions<'py>(
    _py: Python, rust_distcov: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(param_range, m)?)?;
    m.add_function(wrap_pyfunction!(fmt_param_range, m)?)?;
    rust_distcov.add_submodule(m)?;
    Ok(())
}
