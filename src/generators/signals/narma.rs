//! NARMA(n) — nonlinear autoregressive moving-average signal.
//!
//! Purpose
//! -------
//! Generate the n-th order NARMA benchmark series
//!
//! ```text
//! y[k] = a0·y[k-1] + a1·y[k-1]·Σ_{j=k-n}^{k-1} y[j] + a2·u[k-n]·u[k] + a3
//! ```
//!
//! driven by inputs `u ~ Uniform(0, 0.5)`.
//!
//! Key behaviors
//! -------------
//! - Vectorized only. Each call seeds an index window of length `order` with
//!   the initial condition (zeros by default) and the error initial
//!   condition, appends one fresh uniform draw per timestamp, runs the
//!   recurrence, and returns the values after the seeded window.
//! - If no error initial condition was supplied, one is drawn from
//!   `Uniform(0, 0.5)` on the first call and reused by every later call.
//! - The uniform inputs of the last call (excluding the seeded window) are
//!   kept and exposed through [`NARMA::errors`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `order ≥ 1`; `coefficients.len() == 4`; both initial conditions, when
//!   present, have length `order`.
//! - Output length equals `times.len()`. Timestamps only fix the length; the
//!   recurrence runs on the index, so regular grids are expected.
//! - The recurrence can blow up for large coefficients; a NaN/±inf value is
//!   reported as `SynthError::NonFiniteSample` with its output index.
use crate::{
    errors::{SynthError, SynthResult},
    generators::{
        traits::Generator,
        validation::{validate_all_finite, validate_length},
    },
};
use ndarray::{Array1, ArrayView1, s};
use rand::RngCore;
use rand_distr::{Distribution, Uniform};

/// Default NARMA order.
pub const DEFAULT_ORDER: usize = 10;

/// Default coefficients `[a0, a1, a2, a3]`.
pub const DEFAULT_COEFFICIENTS: [f64; 4] = [0.3, 0.05, 1.5, 0.1];

/// Upper bound of the uniform input distribution.
const INPUT_UPPER: f64 = 0.5;

/// NARMA — vectorized-only NARMA(n) generator.
///
/// Fields
/// ------
/// - `order`: interaction order `n`.
/// - `coefficients`: `[a0, a1, a2, a3]`.
/// - `initial_condition`: seed values `y[0..n]`.
/// - `error_initial_condition`: seed inputs `u[0..n]`; `None` until drawn.
/// - `errors`: inputs used by the last vectorized call, seed window excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct NARMA {
    order: usize,
    coefficients: [f64; 4],
    initial_condition: Array1<f64>,
    error_initial_condition: Option<Array1<f64>>,
    errors: Option<Array1<f64>>,
}

impl NARMA {
    /// Construct a NARMA(n) generator.
    ///
    /// Parameters
    /// ----------
    /// - `order`: `n ≥ 1`.
    /// - `coefficients`: exactly four finite values `[a0, a1, a2, a3]`.
    /// - `initial_condition`: optional `y` seed of length `order`; zeros if
    ///   absent.
    /// - `error_initial_condition`: optional `u` seed of length `order`;
    ///   drawn lazily if absent.
    ///
    /// Errors
    /// ------
    /// - `SynthError::InvalidParameter` for `order == 0` or non-finite entries.
    /// - `SynthError::LengthMismatch` for wrongly sized arrays.
    pub fn new(
        order: usize, coefficients: &[f64], initial_condition: Option<&[f64]>,
        error_initial_condition: Option<&[f64]>,
    ) -> SynthResult<Self> {
        if order == 0 {
            return Err(SynthError::InvalidParameter {
                name: "order",
                value: 0.0,
                reason: "Must be at least 1.",
            });
        }
        validate_length("coefficients", 4, coefficients.len())?;
        validate_all_finite("coefficients", coefficients)?;
        let coefficients = [coefficients[0], coefficients[1], coefficients[2], coefficients[3]];

        let initial_condition = match initial_condition {
            Some(values) => seed_array("initial_condition", order, values)?,
            None => Array1::zeros(order),
        };
        let error_initial_condition = error_initial_condition
            .map(|values| seed_array("error_initial_condition", order, values))
            .transpose()?;

        Ok(NARMA { order, coefficients, initial_condition, error_initial_condition, errors: None })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn coefficients(&self) -> [f64; 4] {
        self.coefficients
    }

    /// Uniform inputs used by the most recent vectorized call, one per
    /// returned value. `None` before the first call.
    pub fn errors(&self) -> Option<ArrayView1<'_, f64>> {
        self.errors.as_ref().map(|e| e.view())
    }

    /// One recurrence step at absolute index `k ≥ order`.
    #[inline]
    fn next_value(&self, y: &Array1<f64>, u: &Array1<f64>, k: usize) -> f64 {
        let n = self.order;
        let [a0, a1, a2, a3] = self.coefficients;
        let window_sum = y.slice(s![k - n..k]).sum();
        a0 * y[k - 1] + a1 * y[k - 1] * window_sum + a2 * u[k - n] * u[k] + a3
    }
}

impl Default for NARMA {
    /// Order 10 with coefficients `[0.3, 0.05, 1.5, 0.1]`.
    fn default() -> Self {
        NARMA {
            order: DEFAULT_ORDER,
            coefficients: DEFAULT_COEFFICIENTS,
            initial_condition: Array1::zeros(DEFAULT_ORDER),
            error_initial_condition: None,
            errors: None,
        }
    }
}

impl Generator for NARMA {
    fn name(&self) -> &'static str {
        "NARMA"
    }

    fn is_vectorizable(&self) -> bool {
        true
    }

    fn supports_stepwise(&self) -> bool {
        false
    }

    fn sample_vectorized(
        &mut self, times: ArrayView1<'_, f64>, rng: &mut dyn RngCore,
    ) -> SynthResult<Array1<f64>> {
        let n = self.order;
        let len = times.len();
        let uniform = Uniform::new(0.0, INPUT_UPPER);

        let seed_inputs = match &self.error_initial_condition {
            Some(seed) => seed.clone(),
            None => {
                let drawn: Array1<f64> = (0..n).map(|_| uniform.sample(&mut *rng)).collect();
                self.error_initial_condition = Some(drawn.clone());
                drawn
            }
        };

        let mut u = Array1::<f64>::zeros(n + len);
        u.slice_mut(s![..n]).assign(&seed_inputs);
        u.slice_mut(s![n..]).iter_mut().for_each(|x| *x = uniform.sample(&mut *rng));

        let mut y = Array1::<f64>::zeros(n + len);
        y.slice_mut(s![..n]).assign(&self.initial_condition);
        for k in n..n + len {
            let value = self.next_value(&y, &u, k);
            if !value.is_finite() {
                return Err(SynthError::NonFiniteSample {
                    generator: self.name(),
                    index: k - n,
                    value,
                });
            }
            y[k] = value;
        }

        self.errors = Some(u.slice(s![n..]).to_owned());
        Ok(y.slice(s![n..]).to_owned())
    }
}

fn seed_array(name: &'static str, order: usize, values: &[f64]) -> SynthResult<Array1<f64>> {
    validate_length(name, order, values.len())?;
    validate_all_finite(name, values)?;
    Ok(Array1::from(values.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Output length and the trimmed seed window.
    // - A hand-evaluated first step with fixed seed inputs.
    // - Reuse of the lazily drawn error initial condition.
    // - Stepwise rejection and construction-time length checks.
    //
    // They intentionally DO NOT cover:
    // - Long-run statistics of the benchmark series.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Order 10 with default coefficients returns one value per timestamp.
    //
    // Given
    // -----
    // - `NARMA::default()` and 500 timestamps.
    //
    // Expect
    // ------
    // - 500 finite values and 500 recorded inputs in [0, 0.5).
    fn default_returns_one_value_per_timestamp() {
        // Arrange
        let mut narma = NARMA::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let times = Array1::linspace(0.0, 499.0, 500);

        // Act
        let values = narma.sample_vectorized(times.view(), &mut rng).expect("vectorized");

        // Assert
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| v.is_finite()));
        let errors = narma.errors().expect("errors recorded");
        assert_eq!(errors.len(), 500);
        assert!(errors.iter().all(|&u| (0.0..INPUT_UPPER).contains(&u)));
    }

    #[test]
    // Purpose
    // -------
    // Verify the first recurrence step against a hand evaluation.
    //
    // Given
    // -----
    // - order 2, a = [0.5, 0.1, 2.0, 0.25], y seed [1, 2], u seed [0.2, 0.4].
    //
    // Expect
    // ------
    // - y[2] = 0.5·2 + 0.1·2·(1 + 2) + 2·u[0]·u[2] + 0.25 with u[0] = 0.2 and
    //   u[2] the first fresh input recorded in `errors()[0]`.
    fn first_step_matches_hand_evaluation() {
        // Arrange
        let mut narma =
            NARMA::new(2, &[0.5, 0.1, 2.0, 0.25], Some(&[1.0, 2.0]), Some(&[0.2, 0.4]))
                .expect("valid NARMA");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let times = Array1::linspace(0.0, 2.0, 3);

        // Act
        let values = narma.sample_vectorized(times.view(), &mut rng).expect("vectorized");

        // Assert
        let u2 = narma.errors().expect("errors recorded")[0];
        let expected = 0.5 * 2.0 + 0.1 * 2.0 * 3.0 + 2.0 * 0.2 * u2 + 0.25;
        assert_relative_eq!(values[0], expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A lazily drawn error seed is fixed after the first call.
    //
    // Given
    // -----
    // - A default NARMA sampled twice.
    //
    // Expect
    // ------
    // - The stored error initial condition is identical after both calls.
    fn drawn_error_seed_is_reused() {
        let mut narma = NARMA::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let times = Array1::linspace(0.0, 19.0, 20);

        narma.sample_vectorized(times.view(), &mut rng).expect("first call");
        let first_seed = narma.error_initial_condition.clone().expect("seed drawn");
        narma.sample_vectorized(times.view(), &mut rng).expect("second call");

        assert_eq!(narma.error_initial_condition, Some(first_seed));
    }

    #[test]
    // Purpose
    // -------
    // NARMA cannot be sampled one point at a time.
    fn stepwise_is_not_supported() {
        let mut narma = NARMA::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let empty = Array1::<f64>::zeros(0);
        let err = narma.sample_next(0.0, empty.view(), empty.view(), &mut rng).expect_err("no");
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        assert!(!narma.supports_stepwise());
    }

    #[test]
    fn construction_checks_lengths() {
        assert!(matches!(
            NARMA::new(3, &[0.3, 0.05, 1.5], None, None),
            Err(SynthError::LengthMismatch { name: "coefficients", .. })
        ));
        assert!(matches!(
            NARMA::new(3, &DEFAULT_COEFFICIENTS, Some(&[0.0, 0.0]), None),
            Err(SynthError::LengthMismatch { name: "initial_condition", expected: 3, actual: 2 })
        ));
        assert!(matches!(
            NARMA::new(2, &DEFAULT_COEFFICIENTS, None, Some(&[0.1])),
            Err(SynthError::LengthMismatch { name: "error_initial_condition", .. })
        ));
    }
}
