//! Autoregressive AR(p) signal.
//!
//! Purpose
//! -------
//! Generate a discrete AR(p) process `x_k = Σ_j φ_j · x_{k-j} + σ · ε_k`
//! one step at a time. Intended for regularly sampled grids; timestamps are
//! ignored.
//!
//! Key behaviors
//! -------------
//! - Keep the last `p` values in a window ordered oldest → newest, and the
//!   coefficients reversed (`φ_p, …, φ_1`) so the weighted sum is a plain dot
//!   product of the two arrays.
//! - Each step draws `Normal(0, σ)`, computes the new value, then shifts the
//!   window left and appends it.
//!
//! Invariants & assumptions
//! ------------------------
//! - `p ≥ 1`, and the window length always equals `p`.
//! - Stepwise only; the window makes every value depend on its predecessors.
use crate::{
    errors::{SynthError, SynthResult},
    generators::{
        draws,
        traits::Generator,
        validation::{validate_all_finite, validate_length, validate_spread},
    },
};
use ndarray::{Array1, ArrayView1, s};
use rand::RngCore;

/// AutoRegressive — AR(p) process with Gaussian innovations.
///
/// Fields
/// ------
/// - `coefficients`: `[φ_p, …, φ_1]` (reversed from the constructor input).
/// - `sigma`: innovation standard deviation (≥ 0).
/// - `window`: last `p` values, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoRegressive {
    coefficients: Array1<f64>,
    sigma: f64,
    window: Array1<f64>,
}

impl AutoRegressive {
    /// Construct an AR(p) process.
    ///
    /// Parameters
    /// ----------
    /// - `ar_param`: `[φ_1, …, φ_p]`, most recent lag first. Must be non-empty.
    /// - `sigma`: innovation standard deviation.
    /// - `start_value`: optional initial window `[x_{-p}, …, x_{-1}]`;
    ///   defaults to zeros.
    ///
    /// # Errors
    /// - `SynthError::InvalidParameter` for empty or non-finite coefficients
    ///   or a negative `sigma`.
    /// - `SynthError::LengthMismatch` if `start_value` and `ar_param` differ
    ///   in length.
    pub fn new(ar_param: &[f64], sigma: f64, start_value: Option<&[f64]>) -> SynthResult<Self> {
        if ar_param.is_empty() {
            return Err(SynthError::InvalidParameter {
                name: "ar_param",
                value: 0.0,
                reason: "At least one AR coefficient is required.",
            });
        }
        validate_all_finite("ar_param", ar_param)?;
        let sigma = validate_spread("sigma", sigma)?;
        let p = ar_param.len();
        let window = match start_value {
            Some(values) => {
                validate_length("start_value", p, values.len())?;
                validate_all_finite("start_value", values)?;
                Array1::from(values.to_vec())
            }
            None => Array1::zeros(p),
        };
        let coefficients: Array1<f64> = ar_param.iter().rev().copied().collect();
        Ok(AutoRegressive { coefficients, sigma, window })
    }

    /// Model order `p`.
    pub fn order(&self) -> usize {
        self.coefficients.len()
    }
}

impl Generator for AutoRegressive {
    fn name(&self) -> &'static str {
        "AutoRegressive"
    }

    fn is_vectorizable(&self) -> bool {
        false
    }

    fn sample_next(
        &mut self, _time: f64, _samples: ArrayView1<'_, f64>, _errors: ArrayView1<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> SynthResult<f64> {
        let noise = draws::normal(0.0, self.sigma, rng);
        let value = self.window.dot(&self.coefficients) + noise;
        let p = self.window.len();
        let shifted = self.window.slice(s![1..]).to_owned();
        self.window.slice_mut(s![..p - 1]).assign(&shifted);
        self.window[p - 1] = value;
        Ok(value)
    }
}
