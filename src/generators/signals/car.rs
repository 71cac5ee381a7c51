//! Continuous autoregressive CAR(1) signal for irregular time grids.
//!
//! For a gap `dt` since the previous sample the update is
//! `x = φ^dt · x_prev + σ · sqrt(1 - φ^dt) · z`, `z ~ Normal(0, 1)`, so the
//! decay and the innovation variance both scale with the elapsed time. The
//! first call returns `start_value` without drawing.
use crate::{
    errors::{SynthError, SynthResult},
    generators::{
        draws,
        traits::Generator,
        validation::{validate_finite, validate_spread},
    },
};
use ndarray::ArrayView1;
use rand::RngCore;

/// CAR — continuous-time AR(1) process.
#[derive(Debug, Clone, PartialEq)]
pub struct CAR {
    ar_param: f64,
    sigma: f64,
    start_value: f64,
    previous: Option<(f64, f64)>,
}

impl CAR {
    /// # Errors
    /// - `SynthError::InvalidParameter` if `ar_param ∉ (0, 1]`, `sigma < 0`,
    ///   or `start_value` is not finite.
    pub fn new(ar_param: f64, sigma: f64, start_value: f64) -> SynthResult<Self> {
        let ar_param = validate_finite("ar_param", ar_param)?;
        if ar_param <= 0.0 || ar_param > 1.0 {
            return Err(SynthError::InvalidParameter {
                name: "ar_param",
                value: ar_param,
                reason: "Must lie in (0, 1].",
            });
        }
        Ok(CAR {
            ar_param,
            sigma: validate_spread("sigma", sigma)?,
            start_value: validate_finite("start_value", start_value)?,
            previous: None,
        })
    }
}

impl Default for CAR {
    /// `ar_param = 1`, `sigma = 0.5`, `start_value = 0.01`.
    fn default() -> Self {
        CAR { ar_param: 1.0, sigma: 0.5, start_value: 0.01, previous: None }
    }
}

impl Generator for CAR {
    fn name(&self) -> &'static str {
        "CAR"
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
                let decay = self.ar_param.powf(time - prev_time);
                let z = draws::standard_normal(rng);
                decay * prev_value + self.sigma * (1.0 - decay).sqrt() * z
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
