//! generators::traits — the capability contract shared by every generator.
//!
//! Purpose
//! -------
//! Define [`Generator`], the single interface through which the composer and
//! callers drive signal and noise models. A generator may support stepwise
//! sampling (one timestamp at a time, with access to the history produced so
//! far), vectorized sampling (a whole timestamp vector at once), or both.
//!
//! Key behaviors
//! -------------
//! - [`Generator::sample_next`] draws one value at `time`. Built-in models
//!   mostly ignore the `samples` / `errors` history and thread their own
//!   recurrence state instead; the history is still supplied so custom
//!   generators can condition on it.
//! - [`Generator::sample_vectorized`] draws one value per timestamp in a
//!   single pass. It never reads or writes the per-step recurrence state, so
//!   the two paths of a stochastic generator are numerically independent.
//! - Unsupported modes fall through to the default methods, which return
//!   `SynthError::NotSupported` instead of approximating.
//!
//! Invariants & assumptions
//! ------------------------
//! - `is_vectorizable() == true` implies `sample_vectorized` is implemented
//!   and returns exactly `times.len()` values.
//! - `supports_stepwise() == false` implies `sample_next` always fails with
//!   `SynthError::NotSupported`.
//! - `samples` and `errors` passed to `sample_next` have equal length and
//!   hold only points strictly before `time` (empty at the first step).
//!
//! Conventions
//! -----------
//! - All randomness flows through the `rng` argument; generators hold no
//!   random source of their own.
//! - Generators are single-owner. Stepwise state has no internal
//!   synchronization; share an instance across threads only behind external
//!   serialization.
use crate::errors::{SynthError, SynthResult};
use ndarray::{Array1, ArrayView1};
use rand::RngCore;

/// Generator — stochastic or deterministic model sampled at timestamps.
pub trait Generator {
    /// Short, stable name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Whether [`Generator::sample_vectorized`] is available.
    fn is_vectorizable(&self) -> bool;

    /// Whether [`Generator::sample_next`] is available.
    fn supports_stepwise(&self) -> bool {
        true
    }

    /// Sample a single value at `time`.
    ///
    /// Parameters
    /// ----------
    /// - `time`: timestamp to sample.
    /// - `samples`: combined (signal + noise) values produced before `time`.
    /// - `errors`: noise values produced before `time`.
    /// - `rng`: random source for any draws.
    ///
    /// Errors
    /// ------
    /// - `SynthError::NotSupported` unless overridden.
    fn sample_next(
        &mut self, time: f64, samples: ArrayView1<'_, f64>, errors: ArrayView1<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> SynthResult<f64> {
        let _ = (time, samples, errors, rng);
        Err(not_supported(self.name(), "stepwise"))
    }

    /// Sample one value per timestamp in `times`.
    ///
    /// Errors
    /// ------
    /// - `SynthError::NotSupported` unless overridden.
    fn sample_vectorized(
        &mut self, times: ArrayView1<'_, f64>, rng: &mut dyn RngCore,
    ) -> SynthResult<Array1<f64>> {
        let _ = (times, rng);
        Err(not_supported(self.name(), "vectorized"))
    }
}

/// Build the `NotSupported` error for `generator` and sampling `operation`.
pub(crate) fn not_supported(generator: &'static str, operation: &'static str) -> SynthError {
    SynthError::NotSupported { generator, operation }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Minimal generator relying on every default method.
    struct Bare;

    impl Generator for Bare {
        fn name(&self) -> &'static str {
            "Bare"
        }

        fn is_vectorizable(&self) -> bool {
            false
        }
    }

    #[test]
    // Purpose
    // -------
    // Default sampling methods report `NotSupported` for both modes.
    //
    // Given
    // -----
    // - A generator that overrides neither `sample_next` nor `sample_vectorized`.
    //
    // Expect
    // ------
    // - Both calls fail with `ErrorKind::NotSupported` naming the operation.
    fn default_methods_are_not_supported() {
        // Arrange
        let mut generator = Bare;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let empty = Array1::<f64>::zeros(0);

        // Act
        let step = generator.sample_next(0.0, empty.view(), empty.view(), &mut rng);
        let batch = generator.sample_vectorized(empty.view(), &mut rng);

        // Assert
        let step_err = step.expect_err("stepwise should be unsupported");
        let batch_err = batch.expect_err("vectorized should be unsupported");
        assert_eq!(step_err.kind(), ErrorKind::NotSupported);
        assert_eq!(
            batch_err,
            SynthError::NotSupported { generator: "Bare", operation: "vectorized" }
        );
    }
}
