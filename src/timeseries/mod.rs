//! timeseries — compose a signal and optional noise into one series.
//!
//! Purpose
//! -------
//! Drive a signal generator and an optional noise generator over a
//! timestamp vector and return the combined samples together with their
//! signal and noise components.
//!
//! Key behaviors
//! -------------
//! - Vectorized path: taken when the signal is vectorizable and the noise is
//!   absent or vectorizable. Each generator is called once over the whole
//!   vector; absent noise is the zero sequence.
//! - Iterative path: otherwise, walk the timestamps in order. At index `i`
//!   the noise is sampled first, then the signal, both seeing
//!   `samples[..i]` and `errors[..i]` (empty at `i = 0`). Then
//!   `samples[i] = signal[i] + error[i]`.
//! - Both paths guarantee `samples[i] == signals[i] + errors[i]` exactly.
//!
//! Invariants & assumptions
//! ------------------------
//! - A generator that returns a vectorized result of the wrong length is a
//!   programming error in that generator and is reported as
//!   `SynthError::LengthMismatch` rather than truncated.
//! - The iterative path fails fast with `SynthError::NotSupported` before any
//!   draw if either generator cannot sample stepwise.
//! - Timestamps must be finite; a NaN/±inf entry fails the call before any
//!   generator runs.
//!
//! Downstream usage
//! ----------------
//! - Build times with [`TimeSampler`](crate::sampling::TimeSampler), box the
//!   generators, and call [`TimeSeries::sample`] with a caller-owned RNG.
//!
//! Testing notes
//! -------------
//! - Unit tests check path selection, additivity on both paths, and the
//!   history window handed to stepwise generators.
//! - End-to-end scenarios live in `tests/integration_timeseries_pipeline.rs`.
use crate::{
    errors::{SynthError, SynthResult},
    generators::{
        traits::{Generator, not_supported},
        validation::validate_finite,
    },
    logging,
};
use ndarray::{Array1, ArrayView1, s};
use rand::RngCore;
use slog::{Logger, debug};

/// SampledSeries — output of [`TimeSeries::sample`].
///
/// Fields
/// ------
/// - `samples`: combined values, `signals + errors`.
/// - `signals`: signal component.
/// - `errors`: noise component (zeros without a noise generator).
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSeries {
    pub samples: Array1<f64>,
    pub signals: Array1<f64>,
    pub errors: Array1<f64>,
}

impl SampledSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// TimeSeries — signal + optional noise composer.
pub struct TimeSeries {
    signal: Box<dyn Generator>,
    noise: Option<Box<dyn Generator>>,
    log: Logger,
}

impl TimeSeries {
    pub fn new(signal: Box<dyn Generator>, noise: Option<Box<dyn Generator>>) -> Self {
        TimeSeries { signal, noise, log: logging::discard() }
    }

    pub fn with_logger(mut self, log: Logger) -> Self {
        self.log = log;
        self
    }

    pub fn signal(&self) -> &dyn Generator {
        self.signal.as_ref()
    }

    pub fn noise(&self) -> Option<&dyn Generator> {
        self.noise.as_deref()
    }

    /// Whether [`TimeSeries::sample`] takes the vectorized path.
    pub fn is_vectorizable(&self) -> bool {
        self.signal.is_vectorizable() && self.noise.as_ref().is_none_or(|n| n.is_vectorizable())
    }

    /// Sample the series at `times`.
    ///
    /// Errors
    /// ------
    /// - `SynthError::InvalidParameter` if any timestamp is NaN/±inf.
    /// - Any error raised by the generators, unchanged.
    /// - `SynthError::NotSupported` if the iterative path is required and a
    ///   generator cannot sample stepwise.
    pub fn sample(
        &mut self, times: ArrayView1<'_, f64>, rng: &mut dyn RngCore,
    ) -> SynthResult<SampledSeries> {
        times.iter().try_for_each(|&t| validate_finite("time", t).map(drop))?;
        if self.is_vectorizable() {
            debug!(self.log, "sampling series"; "path" => "vectorized", "points" => times.len());
            self.sample_vectorized(times, rng)
        } else {
            debug!(self.log, "sampling series"; "path" => "iterative", "points" => times.len());
            self.sample_iterative(times, rng)
        }
    }

    fn sample_vectorized(
        &mut self, times: ArrayView1<'_, f64>, rng: &mut dyn RngCore,
    ) -> SynthResult<SampledSeries> {
        let n = times.len();
        let signals = self.signal.sample_vectorized(times, rng)?;
        check_length("signals", n, signals.len())?;
        let errors = match self.noise.as_mut() {
            Some(noise) => noise.sample_vectorized(times, rng)?,
            None => Array1::zeros(n),
        };
        check_length("errors", n, errors.len())?;
        let samples = &signals + &errors;
        Ok(SampledSeries { samples, signals, errors })
    }

    fn sample_iterative(
        &mut self, times: ArrayView1<'_, f64>, rng: &mut dyn RngCore,
    ) -> SynthResult<SampledSeries> {
        if !self.signal.supports_stepwise() {
            return Err(not_supported(self.signal.name(), "stepwise"));
        }
        if let Some(noise) = self.noise.as_ref().filter(|n| !n.supports_stepwise()) {
            return Err(not_supported(noise.name(), "stepwise"));
        }

        let n = times.len();
        let mut samples = Array1::<f64>::zeros(n);
        let mut signals = Array1::<f64>::zeros(n);
        let mut errors = Array1::<f64>::zeros(n);
        for (i, &t) in times.iter().enumerate() {
            let error = match self.noise.as_mut() {
                Some(noise) => {
                    noise.sample_next(t, samples.slice(s![..i]), errors.slice(s![..i]), rng)?
                }
                None => 0.0,
            };
            errors[i] = error;
            let signal =
                self.signal.sample_next(t, samples.slice(s![..i]), errors.slice(s![..i]), rng)?;
            signals[i] = signal;
            samples[i] = signal + error;
        }
        Ok(SampledSeries { samples, signals, errors })
    }
}

fn check_length(name: &'static str, expected: usize, actual: usize) -> SynthResult<()> {
    if expected != actual {
        return Err(SynthError::LengthMismatch { name, expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::ErrorKind,
        generators::{
            noise::{GaussianNoise, RedNoise},
            signals::{Constant, GaussianProcess, Sinusoidal},
            Harmonic,
        },
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::{cell::RefCell, rc::Rc};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Path selection from the generators' vectorizable flags.
    // - Exact additivity on both paths, and zero errors without noise.
    // - The history window handed to stepwise generators.
    // - Fail-fast rejection when a batch-only signal meets stepwise noise.
    // -------------------------------------------------------------------------

    /// Stepwise probe recording the history length it sees at each call.
    struct HistoryProbe {
        seen: Rc<RefCell<Vec<(usize, usize)>>>,
    }

    impl Generator for HistoryProbe {
        fn name(&self) -> &'static str {
            "HistoryProbe"
        }

        fn is_vectorizable(&self) -> bool {
            false
        }

        fn sample_next(
            &mut self, _time: f64, samples: ArrayView1<'_, f64>, errors: ArrayView1<'_, f64>,
            _rng: &mut dyn RngCore,
        ) -> SynthResult<f64> {
            self.seen.borrow_mut().push((samples.len(), errors.len()));
            Ok(samples.sum())
        }
    }

    #[test]
    // Purpose
    // -------
    // Vectorizable signal and noise take the vectorized path and add exactly.
    //
    // Given
    // -----
    // - Sinusoidal signal, Gaussian noise, 100 timestamps.
    //
    // Expect
    // ------
    // - `samples[i] == signals[i] + errors[i]` for every i.
    fn vectorized_path_is_additive() {
        // Arrange
        let mut series = TimeSeries::new(
            Box::new(Sinusoidal::new(1.0, 0.25, Harmonic::Sin).expect("valid")),
            Some(Box::new(GaussianNoise::new(0.0, 0.3).expect("valid"))),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let times = Array1::linspace(0.0, 10.0, 100);

        // Act
        let out = series.sample(times.view(), &mut rng).expect("vectorized");

        // Assert
        assert!(series.is_vectorizable());
        assert_eq!(out.len(), 100);
        for i in 0..out.len() {
            assert_eq!(out.samples[i], out.signals[i] + out.errors[i]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Stepwise-only noise forces the iterative path, which also adds exactly.
    fn iterative_path_is_additive() {
        let mut series = TimeSeries::new(
            Box::new(Constant::new(2.0).expect("valid")),
            Some(Box::new(RedNoise::new(0.0, 1.0, 0.5, 0.0).expect("valid"))),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let times = Array1::linspace(0.0, 5.0, 50);

        let out = series.sample(times.view(), &mut rng).expect("iterative");

        assert!(!series.is_vectorizable());
        assert!(out.signals.iter().all(|&s| s == 2.0));
        for i in 0..out.len() {
            assert_eq!(out.samples[i], out.signals[i] + out.errors[i]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Index i sees exactly i prior samples and errors; index 0 sees none.
    //
    // Given
    // -----
    // - A history probe as the signal and no noise, 4 timestamps.
    //
    // Expect
    // ------
    // - Recorded history lengths (0,0), (1,1), (2,2), (3,3).
    fn iterative_history_window_excludes_current_point() {
        // Arrange
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut series = TimeSeries::new(Box::new(HistoryProbe { seen: Rc::clone(&seen) }), None);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let times = Array1::linspace(0.0, 3.0, 4);

        // Act
        let out = series.sample(times.view(), &mut rng).expect("iterative");

        // Assert
        assert_eq!(*seen.borrow(), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert!(out.errors.iter().all(|&e| e == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite timestamps are rejected on both paths before any draw.
    //
    // Given
    // -----
    // - A sinusoid alone (vectorized) and over red noise (iterative).
    // - Times containing NaN or +inf.
    //
    // Expect
    // ------
    // - `InvalidParameter { name: "time" }`, a configuration error.
    fn non_finite_times_are_rejected() {
        // Arrange
        let sinusoid = Sinusoidal::new(1.0, 1.0, Harmonic::Sin).expect("valid");
        let mut vectorized = TimeSeries::new(Box::new(sinusoid), None);
        let mut iterative =
            TimeSeries::new(Box::new(sinusoid), Some(Box::new(RedNoise::default())));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let nan = Array1::from(vec![f64::NAN]);
        let inf = Array1::from(vec![0.0, 1.0, f64::INFINITY]);

        // Act
        let errs = [
            vectorized.sample(nan.view(), &mut rng).expect_err("NaN time"),
            iterative.sample(inf.view(), &mut rng).expect_err("infinite time"),
        ];

        // Assert
        for err in errs {
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(matches!(err, SynthError::InvalidParameter { name: "time", .. }));
        }
    }

    #[test]
    // Purpose
    // -------
    // A batch-only signal combined with stepwise-only noise is rejected
    // before any sampling.
    fn batch_signal_with_stepwise_noise_is_not_supported() {
        let mut series = TimeSeries::new(
            Box::new(GaussianProcess::default()),
            Some(Box::new(RedNoise::default())),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let times = Array1::linspace(0.0, 1.0, 5);

        let err = series.sample(times.view(), &mut rng).expect_err("GP cannot step");

        assert_eq!(err.kind(), ErrorKind::NotSupported);
        assert_eq!(series.signal().name(), "GaussianProcess");
        assert_eq!(series.noise().map(|n| n.name()), Some("RedNoise"));
    }
}
