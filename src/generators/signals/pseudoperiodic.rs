//! Pseudo-periodic signal — a harmonic with jittered amplitude and frequency.
//!
//! Purpose
//! -------
//! Model quasi-periodic phenomena whose cycle length and peak height wander
//! from point to point.
//!
//! Key behaviors
//! -------------
//! - At each requested timestamp draw `φ ~ Normal(frequency, freq_sd)` and
//!   `A ~ Normal(amplitude, amp_sd)` independently, and return `A · f(φ · t)`.
//! - Nothing persists between calls, so the generator is vectorizable. The
//!   vectorized path draws all frequencies first, then all amplitudes.
//!
//! Conventions
//! -----------
//! - Unlike [`super::Sinusoidal`], the phase is `φ · t` (angular frequency),
//!   not `2π · φ · t`.
use crate::{
    errors::SynthResult,
    generators::{
        draws,
        harmonic::Harmonic,
        traits::Generator,
        validation::{validate_finite, validate_spread},
    },
};
use ndarray::{Array1, ArrayView1, Zip};
use rand::RngCore;

/// PseudoPeriodic — harmonic signal with per-point Gaussian jitter.
///
/// Fields
/// ------
/// - `amplitude`, `amp_sd`: mean and spread of the amplitude draw.
/// - `frequency`, `freq_sd`: mean and spread of the angular-frequency draw.
/// - `harmonic`: periodic shape applied to the phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoPeriodic {
    amplitude: f64,
    frequency: f64,
    amp_sd: f64,
    freq_sd: f64,
    harmonic: Harmonic,
}

impl PseudoPeriodic {
    /// # Errors
    /// - `SynthError::InvalidParameter` if a mean is not finite or a spread is
    ///   negative.
    pub fn new(
        amplitude: f64, frequency: f64, amp_sd: f64, freq_sd: f64, harmonic: Harmonic,
    ) -> SynthResult<Self> {
        Ok(PseudoPeriodic {
            amplitude: validate_finite("amplitude", amplitude)?,
            frequency: validate_finite("frequency", frequency)?,
            amp_sd: validate_spread("amp_sd", amp_sd)?,
            freq_sd: validate_spread("freq_sd", freq_sd)?,
            harmonic,
        })
    }

    pub fn harmonic(&self) -> Harmonic {
        self.harmonic
    }
}

impl Default for PseudoPeriodic {
    /// `amplitude = 1`, `frequency = 100`, `amp_sd = 0.1`, `freq_sd = 0.1`, sine.
    fn default() -> Self {
        PseudoPeriodic {
            amplitude: 1.0,
            frequency: 100.0,
            amp_sd: 0.1,
            freq_sd: 0.1,
            harmonic: Harmonic::Sin,
        }
    }
}

impl Generator for PseudoPeriodic {
    fn name(&self) -> &'static str {
        "PseudoPeriodic"
    }

    fn is_vectorizable(&self) -> bool {
        true
    }

    fn sample_next(
        &mut self, time: f64, _samples: ArrayView1<'_, f64>, _errors: ArrayView1<'_, f64>,
        rng: &mut dyn RngCore,
    ) -> SynthResult<f64> {
        let frequency = draws::normal(self.frequency, self.freq_sd, rng);
        let amplitude = draws::normal(self.amplitude, self.amp_sd, rng);
        Ok(amplitude * self.harmonic.apply(frequency * time))
    }

    fn sample_vectorized(
        &mut self, times: ArrayView1<'_, f64>, rng: &mut dyn RngCore,
    ) -> SynthResult<Array1<f64>> {
        let n = times.len();
        let frequencies: Array1<f64> =
            (0..n).map(|_| draws::normal(self.frequency, self.freq_sd, &mut *rng)).collect();
        let amplitudes: Array1<f64> =
            (0..n).map(|_| draws::normal(self.amplitude, self.amp_sd, &mut *rng)).collect();
        let harmonic = self.harmonic;
        Ok(Zip::from(&times)
            .and(&frequencies)
            .and(&amplitudes)
            .map_collect(|&t, &freq, &amp| amp * harmonic.apply(freq * t)))
    }
}
