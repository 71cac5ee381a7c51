//! utils — conversion helpers for the PyO3 bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature. The
//! helpers turn loosely typed Python inputs (array-likes, kernel and harmonic
//! names, history tuples, optional seeds) into the validated Rust types the
//! generators expect, mapping failures into `PyErr`.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use rand::SeedableRng;

#[cfg(feature = "python-bindings")]
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "python-bindings")]
use crate::generators::{
    Harmonic,
    signals::{Anchor, History, KernelType},
};

/// Accept a 1-D numpy array, a pandas Series, or any float sequence.
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

/// Same as [`extract_f64_array`], copied into an owned `Vec`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_array().to_vec())
}

/// Optional array-like argument as an owned `Vec`.
#[cfg(feature = "python-bindings")]
pub fn extract_optional_vec<'py>(
    py: Python<'py>, raw_data: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<Vec<f64>>> {
    raw_data.map(|raw| extract_f64_vec(py, raw)).transpose()
}

/// Seeded ChaCha8 stream, or one seeded from OS entropy when `seed` is `None`.
#[cfg(feature = "python-bindings")]
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Parse a harmonic function name (`"sin"`, `"cos"`, `"tan"`).
#[cfg(feature = "python-bindings")]
pub fn extract_harmonic(ftype: Option<&str>) -> PyResult<Harmonic> {
    Ok(ftype.map(str::parse::<Harmonic>).transpose()?.unwrap_or_default())
}

/// Optional shape-parameter overrides for a named kernel.
#[cfg(feature = "python-bindings")]
#[derive(Debug, Default, Clone, Copy)]
pub struct KernelOverrides {
    pub gamma: Option<f64>,
    pub alpha: Option<f64>,
    pub c: Option<f64>,
    pub offset: Option<f64>,
    pub nu: Option<f64>,
    pub p: Option<f64>,
}

/// Resolve a kernel name and apply any shape overrides that belong to it.
///
/// Overrides for parameters the kernel does not have are rejected rather
/// than ignored.
#[cfg(feature = "python-bindings")]
pub fn extract_kernel(name: &str, overrides: KernelOverrides) -> PyResult<KernelType> {
    let KernelOverrides { gamma, alpha, c, offset, nu, p } = overrides;
    let kernel = match name.parse::<KernelType>()? {
        KernelType::Exponential { gamma: g } => {
            KernelType::Exponential { gamma: gamma.unwrap_or(g) }
        }
        KernelType::RationalQuadratic { alpha: a } => {
            KernelType::RationalQuadratic { alpha: alpha.unwrap_or(a) }
        }
        KernelType::Linear { c: c0, offset: o0 } => {
            KernelType::Linear { c: c.unwrap_or(c0), offset: offset.unwrap_or(o0) }
        }
        KernelType::Matern { nu: n0 } => KernelType::Matern { nu: nu.unwrap_or(n0) },
        KernelType::Periodic { p: p0 } => KernelType::Periodic { p: p.unwrap_or(p0) },
        other => other,
    };

    let unused = match kernel {
        KernelType::Exponential { .. } => [alpha, c, offset, nu, p].iter().any(Option::is_some),
        KernelType::RationalQuadratic { .. } => {
            [gamma, c, offset, nu, p].iter().any(Option::is_some)
        }
        KernelType::Linear { .. } => [gamma, alpha, nu, p].iter().any(Option::is_some),
        KernelType::Matern { .. } => [gamma, alpha, c, offset, p].iter().any(Option::is_some),
        KernelType::Periodic { .. } => [gamma, alpha, c, offset, nu].iter().any(Option::is_some),
        KernelType::Constant | KernelType::SquaredExponential => {
            [gamma, alpha, c, offset, nu, p].iter().any(Option::is_some)
        }
    };
    if unused {
        return Err(PyValueError::new_err(format!(
            "shape parameter supplied that the {} kernel does not use",
            kernel.name()
        )));
    }
    Ok(kernel)
}

/// Convert `(time, value, derivative)` tuples into a validated [`History`].
#[cfg(feature = "python-bindings")]
pub fn extract_history(anchors: Option<Vec<(f64, f64, f64)>>) -> PyResult<Option<History>> {
    anchors
        .map(|tuples| {
            let anchors = tuples.into_iter().map(|(t, v, d)| Anchor::new(t, v, d)).collect();
            History::new(anchors).map_err(PyErr::from)
        })
        .transpose()
}

/// Move the signal model (and the noise model, if any) out of their slots.
///
/// Both slots are checked before either is emptied, so on error neither
/// model is lost.
#[cfg(feature = "python-bindings")]
pub fn take_models<T>(
    signal: &mut Option<T>, noise: Option<&mut Option<T>>, missing: fn() -> PyErr,
) -> PyResult<(T, Option<T>)> {
    if signal.is_none() || noise.as_ref().is_some_and(|n| n.is_none()) {
        return Err(missing());
    }
    let signal = signal.take().ok_or_else(missing)?;
    let noise = match noise {
        Some(slot) => Some(slot.take().ok_or_else(missing)?),
        None => None,
    };
    Ok((signal, noise))
}
