//! Constant signal.
use crate::{
    errors::SynthResult,
    generators::{traits::Generator, validation::validate_finite},
};
use ndarray::{Array1, ArrayView1};
use rand::RngCore;

/// Constant — returns the same value at every timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constant {
    value: f64,
}

impl Constant {
    /// # Errors
    /// - `SynthError::InvalidParameter` if `value` is not finite.
    pub fn new(value: f64) -> SynthResult<Self> {
        Ok(Constant { value: validate_finite("value", value)? })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Generator for Constant {
    fn name(&self) -> &'static str {
        "Constant"
    }

    fn is_vectorizable(&self) -> bool {
        true
    }

    fn sample_next(
        &mut self, _time: f64, _samples: ArrayView1<'_, f64>, _errors: ArrayView1<'_, f64>,
        _rng: &mut dyn RngCore,
    ) -> SynthResult<f64> {
        Ok(self.value)
    }

    fn sample_vectorized(
        &mut self, times: ArrayView1<'_, f64>, _rng: &mut dyn RngCore,
    ) -> SynthResult<Array1<f64>> {
        Ok(Array1::from_elem(times.len(), self.value))
    }
}
