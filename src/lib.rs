//! rust_timesynth — synthetic time-series generation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the samplers, generators, and composer to Python via the
//! `_rust_timesynth` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: `sampling` (timestamp grids),
//!   `generators` (the `Generator` contract plus the signal and noise
//!   family), and `timeseries` (the signal + noise composer).
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_timesynth` Python extension when `python-bindings` is enabled.
//! - Register Python submodules (`sampling`, `generators`) under
//!   `rust_timesynth` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument defaults, and error mapping.
//! - Every Python object owns its own ChaCha8 stream, seeded from `seed`
//!   when given and from OS entropy otherwise.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_timesynth.<submodule>`.
//! - `SynthError` values are converted to `ValueError`,
//!   `NotImplementedError`, or `ArithmeticError` at the boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust callers: build times with [`sampling::TimeSampler`], box the
//!   generators from [`generators`], and sample through
//!   [`timeseries::TimeSeries`], passing any `RngCore`.
//! - Python callers: `TimeSampler(stop_time=20, seed=1)`,
//!   `Generator.gaussian_noise(std=0.3)`, `TimeSeries(signal, noise)`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_timeseries_pipeline.rs`.
//! - The PyO3 layer is exercised from Python; it adds no numerical logic.

pub mod errors;
pub mod generators;
pub mod logging;
pub mod sampling;
pub mod timeseries;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "python-bindings")]
use crate::{
    generators::{
        Generator as _,
        noise::{GaussianNoise, RedNoise},
        signals::{
            AutoRegressive, CAR, Constant, GaussianProcess, MackeyGlass, MackeyGlassOptions,
            NARMA, PseudoPeriodic, Sinusoidal, narma::DEFAULT_COEFFICIENTS,
        },
    },
    utils::{
        KernelOverrides, extract_f64_array, extract_f64_vec, extract_harmonic, extract_history,
        extract_kernel, extract_optional_vec, make_rng, take_models,
    },
};

/// TimeSampler — Python-facing wrapper for [`sampling::TimeSampler`].
///
/// Parameters
/// ----------
/// Constructed from Python via `TimeSampler(start_time=0.0, stop_time=10.0, seed=None)`.
///
/// Fields
/// ------
/// - `inner`: validated Rust sampler.
/// - `rng`: stream used by irregular sampling.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_timesynth.sampling", unsendable)]
pub struct TimeSampler {
    inner: sampling::TimeSampler,
    rng: ChaCha8Rng,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl TimeSampler {
    #[new]
    #[pyo3(
        signature = (start_time = 0.0, stop_time = 10.0, seed = None),
        text_signature = "(start_time=0.0, stop_time=10.0, seed=None)"
    )]
    pub fn new(start_time: f64, stop_time: f64, seed: Option<u64>) -> PyResult<Self> {
        let inner = sampling::TimeSampler::new(start_time, stop_time)?;
        Ok(TimeSampler { inner, rng: make_rng(seed) })
    }

    #[pyo3(signature = (num_points = None, resolution = None))]
    pub fn sample_regular_time<'py>(
        &self, py: Python<'py>, num_points: Option<usize>, resolution: Option<f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let times = self.inner.sample_regular_time(num_points, resolution)?;
        Ok(times.into_pyarray(py))
    }

    #[pyo3(signature = (num_points = None, resolution = None, keep_percentage = 100.0))]
    pub fn sample_irregular_time<'py>(
        &mut self, py: Python<'py>, num_points: Option<usize>, resolution: Option<f64>,
        keep_percentage: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let times = self.inner.sample_irregular_time(
            num_points,
            resolution,
            keep_percentage,
            &mut self.rng,
        )?;
        Ok(times.into_pyarray(py))
    }
}

/// Generator — Python-facing wrapper around any signal or noise model.
///
/// Key behaviors
/// -------------
/// - One static factory per model, each taking the model's parameters with
///   their Rust defaults. Stochastic models also take an optional `seed`.
/// - `sample_next` / `sample_vectorized` forward to the Rust generator.
/// - Passing the wrapper to `TimeSeries` moves the model into the series;
///   the wrapper cannot be sampled afterwards.
///
/// Notes
/// -----
/// - `seed` seeds this wrapper's own stream, which drives only direct
///   `sample_next` / `sample_vectorized` calls. A `TimeSeries` samples its
///   generators from the series' stream (its own `seed`), so a generator
///   seed has no effect once the model has moved into a series.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_timesynth.generators", unsendable)]
pub struct Generator {
    inner: Option<Box<dyn generators::Generator>>,
    rng: ChaCha8Rng,
}

#[cfg(feature = "python-bindings")]
impl Generator {
    fn wrap<G: generators::Generator + 'static>(generator: G, seed: Option<u64>) -> Self {
        Generator { inner: Some(Box::new(generator)), rng: make_rng(seed) }
    }

    fn model(&self) -> PyResult<&dyn generators::Generator> {
        self.inner.as_deref().ok_or_else(moved)
    }
}

#[cfg(feature = "python-bindings")]
fn moved() -> PyErr {
    PyValueError::new_err("generator has been moved into a TimeSeries")
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Generator {
    #[staticmethod]
    #[pyo3(signature = (mean = 0.0, std = 1.0, seed = None))]
    pub fn gaussian_noise(mean: f64, std: f64, seed: Option<u64>) -> PyResult<Self> {
        Ok(Self::wrap(GaussianNoise::new(mean, std)?, seed))
    }

    #[staticmethod]
    #[pyo3(signature = (mean = 0.0, std = 1.0, tau = 0.2, start_value = 0.0, seed = None))]
    pub fn red_noise(
        mean: f64, std: f64, tau: f64, start_value: f64, seed: Option<u64>,
    ) -> PyResult<Self> {
        Ok(Self::wrap(RedNoise::new(mean, std, tau, start_value)?, seed))
    }

    #[staticmethod]
    #[pyo3(signature = (value = 0.0))]
    pub fn constant(value: f64) -> PyResult<Self> {
        Ok(Self::wrap(Constant::new(value)?, Some(0)))
    }

    #[staticmethod]
    #[pyo3(signature = (amplitude = 1.0, frequency = 1.0, ftype = None))]
    pub fn sinusoidal(amplitude: f64, frequency: f64, ftype: Option<&str>) -> PyResult<Self> {
        let harmonic = extract_harmonic(ftype)?;
        Ok(Self::wrap(Sinusoidal::new(amplitude, frequency, harmonic)?, Some(0)))
    }

    #[staticmethod]
    #[pyo3(
        signature = (
            amplitude = 1.0,
            frequency = 100.0,
            amp_sd = 0.1,
            freq_sd = 0.1,
            ftype = None,
            seed = None,
        )
    )]
    pub fn pseudo_periodic(
        amplitude: f64, frequency: f64, amp_sd: f64, freq_sd: f64, ftype: Option<&str>,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let harmonic = extract_harmonic(ftype)?;
        let signal = PseudoPeriodic::new(amplitude, frequency, amp_sd, freq_sd, harmonic)?;
        Ok(Self::wrap(signal, seed))
    }

    #[staticmethod]
    #[pyo3(signature = (ar_param, sigma = 0.5, start_value = None, seed = None))]
    pub fn autoregressive<'py>(
        py: Python<'py>, ar_param: &Bound<'py, PyAny>, sigma: f64,
        start_value: Option<&Bound<'py, PyAny>>, seed: Option<u64>,
    ) -> PyResult<Self> {
        let ar_param = extract_f64_vec(py, ar_param)?;
        let start_value = extract_optional_vec(py, start_value)?;
        let signal = AutoRegressive::new(&ar_param, sigma, start_value.as_deref())?;
        Ok(Self::wrap(signal, seed))
    }

    #[staticmethod]
    #[pyo3(signature = (ar_param = 1.0, sigma = 0.5, start_value = 0.01, seed = None))]
    pub fn car(ar_param: f64, sigma: f64, start_value: f64, seed: Option<u64>) -> PyResult<Self> {
        Ok(Self::wrap(CAR::new(ar_param, sigma, start_value)?, seed))
    }

    #[staticmethod]
    #[pyo3(
        signature = (
            order = 10,
            coefficients = None,
            initial_condition = None,
            error_initial_condition = None,
            seed = None,
        )
    )]
    pub fn narma<'py>(
        py: Python<'py>, order: usize, coefficients: Option<&Bound<'py, PyAny>>,
        initial_condition: Option<&Bound<'py, PyAny>>,
        error_initial_condition: Option<&Bound<'py, PyAny>>, seed: Option<u64>,
    ) -> PyResult<Self> {
        let coefficients = extract_optional_vec(py, coefficients)?
            .unwrap_or_else(|| DEFAULT_COEFFICIENTS.to_vec());
        let initial_condition = extract_optional_vec(py, initial_condition)?;
        let error_initial_condition = extract_optional_vec(py, error_initial_condition)?;
        let signal = NARMA::new(
            order,
            &coefficients,
            initial_condition.as_deref(),
            error_initial_condition.as_deref(),
        )?;
        Ok(Self::wrap(signal, seed))
    }

    #[staticmethod]
    #[allow(clippy::too_many_arguments)]
    #[pyo3(
        signature = (
            kernel = "SE",
            lengthscale = 1.0,
            variance = 1.0,
            mean = 0.0,
            gamma = None,
            alpha = None,
            c = None,
            offset = None,
            nu = None,
            p = None,
            seed = None,
        )
    )]
    pub fn gaussian_process(
        kernel: &str, lengthscale: f64, variance: f64, mean: f64, gamma: Option<f64>,
        alpha: Option<f64>, c: Option<f64>, offset: Option<f64>, nu: Option<f64>, p: Option<f64>,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let overrides = KernelOverrides { gamma, alpha, c, offset, nu, p };
        let kind = extract_kernel(kernel, overrides)?;
        Ok(Self::wrap(GaussianProcess::new(kind, lengthscale, variance, mean)?, seed))
    }

    #[staticmethod]
    #[pyo3(
        signature = (
            tau = 17.0,
            n = 10.0,
            beta = 0.2,
            gamma = 0.1,
            burn_in = 500.0,
            step = 0.01,
            history = None,
        )
    )]
    pub fn mackey_glass(
        tau: f64, n: f64, beta: f64, gamma: f64, burn_in: f64, step: f64,
        history: Option<Vec<(f64, f64, f64)>>,
    ) -> PyResult<Self> {
        let options = MackeyGlassOptions::new(tau, n, beta, gamma, burn_in, step)?;
        let history = extract_history(history)?;
        Ok(Self::wrap(MackeyGlass::new(options, history)?, Some(0)))
    }

    #[getter]
    pub fn name(&self) -> PyResult<&'static str> {
        Ok(self.model()?.name())
    }

    #[getter]
    pub fn vectorizable(&self) -> PyResult<bool> {
        Ok(self.model()?.is_vectorizable())
    }

    #[pyo3(signature = (time, samples = None, errors = None))]
    pub fn sample_next<'py>(
        &mut self, py: Python<'py>, time: f64, samples: Option<&Bound<'py, PyAny>>,
        errors: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<f64> {
        let samples = ndarray::Array1::from(extract_optional_vec(py, samples)?.unwrap_or_default());
        let errors = ndarray::Array1::from(extract_optional_vec(py, errors)?.unwrap_or_default());
        if samples.len() != errors.len() {
            return Err(PyValueError::new_err("samples and errors must have the same length"));
        }
        let Generator { inner, rng } = self;
        let model = inner.as_mut().ok_or_else(moved)?;
        Ok(model.sample_next(time, samples.view(), errors.view(), rng)?)
    }

    pub fn sample_vectorized<'py>(
        &mut self, py: Python<'py>, times: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let times = extract_f64_array(py, times)?;
        let Generator { inner, rng } = self;
        let model = inner.as_mut().ok_or_else(moved)?;
        let values = model.sample_vectorized(times.as_array(), rng)?;
        Ok(values.into_pyarray(py))
    }
}

/// TimeSeries — Python-facing wrapper for [`timeseries::TimeSeries`].
///
/// Parameters
/// ----------
/// Constructed via `TimeSeries(signal, noise=None, seed=None)`. The
/// generators are moved out of their Python wrappers, and only after both
/// are confirmed present, so a failed construction leaves them usable.
/// `seed` seeds the one stream every `sample` call draws from; seeds given
/// to the generators' factories do not apply here.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_timesynth.generators", unsendable)]
pub struct TimeSeries {
    inner: timeseries::TimeSeries,
    rng: ChaCha8Rng,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl TimeSeries {
    #[new]
    #[pyo3(signature = (signal, noise = None, seed = None))]
    pub fn new(
        signal: &Bound<'_, Generator>, noise: Option<&Bound<'_, Generator>>, seed: Option<u64>,
    ) -> PyResult<Self> {
        if noise.is_some_and(|n| n.is(signal)) {
            return Err(PyValueError::new_err("signal and noise must be distinct generators"));
        }
        let mut signal = signal.borrow_mut();
        let mut noise = noise.map(|n| n.borrow_mut());
        let (signal, noise) =
            take_models(&mut signal.inner, noise.as_mut().map(|n| &mut n.inner), moved)?;
        Ok(TimeSeries { inner: timeseries::TimeSeries::new(signal, noise), rng: make_rng(seed) })
    }

    #[getter]
    pub fn vectorizable(&self) -> bool {
        self.inner.is_vectorizable()
    }

    /// Returns `(samples, signals, errors)`.
    #[allow(clippy::type_complexity)]
    pub fn sample<'py>(
        &mut self, py: Python<'py>, times: &Bound<'py, PyAny>,
    ) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)>
    {
        let times = extract_f64_array(py, times)?;
        let out = self.inner.sample(times.as_array(), &mut self.rng)?;
        Ok((out.samples.into_pyarray(py), out.signals.into_pyarray(py), out.errors.into_pyarray(py)))
    }
}

/// _rust_timesynth — PyO3 module initializer.
///
/// Registers the `sampling` and `generators` submodules and inserts them
/// into `sys.modules` so `rust_timesynth.sampling` imports resolve.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_timesynth<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let sampling_mod = PyModule::new(_py, "sampling")?;
    let generators_mod = PyModule::new(_py, "generators")?;
    sampling_module(_py, m, &sampling_mod)?;
    generators_module(_py, m, &generators_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_timesynth.sampling", sampling_mod)?;

    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_timesynth.generators", generators_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn sampling_module<'py>(
    _py: Python, rust_timesynth: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<TimeSampler>()?;
    rust_timesynth.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn generators_module<'py>(
    _py: Python, rust_timesynth: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Generator>()?;
    m.add_class::<TimeSeries>()?;
    rust_timesynth.add_submodule(m)?;
    Ok(())
}
