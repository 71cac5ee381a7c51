//! Red noise — exponentially smoothed white noise with memory constant `tau`.
//!
//! Purpose
//! -------
//! Produce temporally correlated noise for irregularly sampled series. Each
//! step blends the previous value with a fresh white draw, weighting by the
//! elapsed time `dt` relative to `tau`.
//!
//! Key behaviors
//! -------------
//! - The first call returns `start_value` and consumes no randomness.
//! - Later calls at time `t` compute `dt = t - t_prev`, draw
//!   `w ~ Normal(mean, std)`, and return
//!   `tau / (tau + dt) · (dt · w + x_prev)`.
//! - Only stepwise sampling is supported; the recurrence threads state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Timestamps are expected in non-decreasing order. A step that makes
//!   `tau + dt` vanish yields a non-finite value and is reported as
//!   `SynthError::NonFiniteSample` rather than stored.
use crate::{
    errors::{SynthError, SynthResult},
    generators::{
        draws,
        traits::Generator,
        validation::{validate_finite, validate_positive, validate_spread},
    },
};
use ndarray::ArrayView1;
use rand::RngCore;

/// RedNoise — correlated (red) noise generator.
///
/// Fields
/// ------
/// - `mean`, `std`: parameters of the white-noise innovations.
/// - `tau`: memory constant (> 0). Larger values smooth more.
/// - `start_value`: value returned at the first step.
/// - `previous`: `(time, value)` of the last step, `None` before the first.
#[derive(Debug, Clone, PartialEq)]
pub struct RedNoise {
    mean: f64,
    std: f64,
    tau: f64,
    start_value: f64,
    previous: Option<(f64, f64)>,
}

impl RedNoise {
    /// Construct red noise.
    ///
    /// # Errors
    /// - `SynthError::InvalidParameter` if `mean`/`start_value` are not
    ///   finite, `std` is negative, or `tau` is not strictly positive.
    pub fn new(mean: f64, std: f64, tau: f64, start_value: f64) -> SynthResult<Self> {
        Ok(RedNoise {
            mean: validate_finite("mean", mean)?,
            std: validate_spread("std", std)?,
            tau: validate_positive("tau", tau)?,
            start_value: validate_finite("start_value", start_value)?,
            previous: None,
        })
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }
}

impl Default for RedNoise {
    /// `mean = 0`, `std = 1`, `tau = 0.2`, `start_value = 0`.
    fn default() -> Self {
        RedNoise { mean: 0.0, std: 1.0, tau: 0.2, start_value: 0.0, previous: None }
    }
}

impl Generator for RedNoise {
    fn name(&self) -> &'static str {
        "RedNoise"
    }

    fn is_vectorizable(&self) -> bool {
        false
    }

    fn sample_next(
        &mut self, time: f64, samples: ArrayView1<'_, f64>, _errors: ArrayView1<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> SynthResult<f64> {
        let value = match self.previous {
            None => self.start_value,
            Some((prev_time, prev_value)) => {
                let dt = time - prev_time;
                let white = draws::normal(self.mean, self.std, rng);
                (self.tau / (self.tau + dt)) * (dt * white + prev_value)
            }
        };
        if !value.is_finite() {
            return Err(SynthError::NonFiniteSample {
                generator: self.name(),
                index: samples.len(),
                value,
            });
        }
        self.previous = Some((time, value));
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use ndarray::Array1;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - First-step behavior (start value, no randomness consumed).
    // - Exact agreement of the second step with the closed-form update given
    //   the same white draw.
    // - Rejection of vectorized sampling and invalid `tau`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the recurrence against a hand evaluation with a replayed draw.
    //
    // Given
    // -----
    // - `RedNoise::default()` (`tau = 0.2`, `start_value = 0`).
    // - A seeded RNG and a clone of it used to replay the white draw.
    //
    // Expect
    // ------
    // - Step at t=0 returns 0.
    // - Step at t=1 returns `0.2 / 1.2 · (1 · w + 0)`.
    fn second_step_matches_closed_form() {
        // Arrange
        let mut noise = RedNoise::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut replay = rng.clone();
        let empty = Array1::<f64>::zeros(0);
        let one = Array1::<f64>::zeros(1);

        // Act
        let first = noise.sample_next(0.0, empty.view(), empty.view(), &mut rng).expect("t=0");
        let second = noise.sample_next(1.0, one.view(), one.view(), &mut rng).expect("t=1");

        // Assert
        let white = draws::normal(0.0, 1.0, &mut replay);
        let expected = (0.2 / (0.2 + 1.0)) * (1.0 * white + 0.0);
        assert_eq!(first, 0.0);
        assert_eq!(second, expected);
    }

    #[test]
    // Purpose
    // -------
    // A custom start value is returned verbatim at the first step.
    fn first_step_returns_start_value() {
        let mut noise = RedNoise::new(0.0, 1.0, 0.5, 3.25).expect("valid red noise");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let empty = Array1::<f64>::zeros(0);
        let first = noise.sample_next(4.0, empty.view(), empty.view(), &mut rng).expect("t=4");
        assert_eq!(first, 3.25);
    }

    #[test]
    // Purpose
    // -------
    // Red noise is stepwise-only and requires a positive memory constant.
    fn rejects_vectorized_and_nonpositive_tau() {
        let mut noise = RedNoise::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let times = Array1::linspace(0.0, 1.0, 3);
        let err = noise.sample_vectorized(times.view(), &mut rng).expect_err("not vectorizable");
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        assert!(RedNoise::new(0.0, 1.0, 0.0, 0.0).is_err());
    }
}
