//! Gaussian white noise — i.i.d. `Normal(mean, std)` draws.
//!
//! The `mean`/`std` accessors are public so bindings and tests can echo the
//! configuration back.
use crate::{
    errors::SynthResult,
    generators::{
        draws,
        traits::Generator,
        validation::{validate_finite, validate_spread},
    },
};
use ndarray::{Array1, ArrayView1};
use rand::RngCore;

/// GaussianNoise — uncorrelated additive white noise.
///
/// Every requested point is an independent draw from `Normal(mean, std)`;
/// there is no state, so stepwise and vectorized sampling are equivalent in
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianNoise {
    mean: f64,
    std: f64,
}

impl GaussianNoise {
    /// Construct white noise with the given mean and standard deviation.
    ///
    /// # Errors
    /// - `SynthError::InvalidParameter` if `mean` is not finite or `std` is
    ///   negative / non-finite.
    pub fn new(mean: f64, std: f64) -> SynthResult<Self> {
        let mean = validate_finite("mean", mean)?;
        let std = validate_spread("std", std)?;
        Ok(GaussianNoise { mean, std })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}

impl Default for GaussianNoise {
    /// Standard normal noise, `Normal(0, 1)`.
    fn default() -> Self {
        GaussianNoise { mean: 0.0, std: 1.0 }
    }
}

impl Generator for GaussianNoise {
    fn name(&self) -> &'static str {
        "GaussianNoise"
    }

    fn is_vectorizable(&self) -> bool {
        true
    }

    fn sample_next(
        &mut self, _time: f64, _samples: ArrayView1<'_, f64>, _errors: ArrayView1<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> SynthResult<f64> {
        Ok(draws::normal(self.mean, self.std, rng))
    }

    fn sample_vectorized(
        &mut self, times: ArrayView1<'_, f64>, rng: &mut dyn RngCore,
    ) -> SynthResult<Array1<f64>> {
        let (mean, std) = (self.mean, self.std);
        Ok(Array1::from_iter((0..times.len()).map(|_| draws::normal(mean, std, &mut *rng))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SynthError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter validation in `GaussianNoise::new`.
    // - Output length of vectorized sampling and the zero-spread edge case.
    //
    // They intentionally DO NOT cover:
    // - Goodness of fit of the draws; `rand_distr` owns that.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Negative standard deviations are a configuration error.
    fn new_rejects_negative_std() {
        let err = GaussianNoise::new(0.0, -0.3).expect_err("negative std");
        assert!(matches!(err, SynthError::InvalidParameter { name: "std", .. }));
    }

    #[test]
    // Purpose
    // -------
    // Vectorized sampling returns one value per timestamp; stepwise returns a
    // scalar with empty history.
    //
    // Given
    // -----
    // - `GaussianNoise(std = 0.3)` and a 250-point time vector.
    //
    // Expect
    // ------
    // - 250 finite values; a finite scalar from `sample_next`.
    fn vectorized_length_matches_times() {
        // Arrange
        let mut noise = GaussianNoise::new(0.0, 0.3).expect("valid noise");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let times = Array1::linspace(0.0, 20.0, 250);
        let empty = Array1::<f64>::zeros(0);

        // Act
        let values = noise.sample_vectorized(times.view(), &mut rng).expect("vectorized");
        let single =
            noise.sample_next(times[0], empty.view(), empty.view(), &mut rng).expect("stepwise");

        // Assert
        assert_eq!(values.len(), 250);
        assert!(values.iter().all(|v| v.is_finite()));
        assert!(single.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // With zero spread every draw equals the mean exactly.
    fn zero_std_returns_mean() {
        let mut noise = GaussianNoise::new(1.5, 0.0).expect("zero std is admissible");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let times = Array1::linspace(0.0, 1.0, 5);
        let values = noise.sample_vectorized(times.view(), &mut rng).expect("vectorized");
        assert!(values.iter().all(|&v| v == 1.5));
    }
}
