//! gaussian_process — Gaussian Process signal over a kernel catalog.
//!
//! Purpose
//! -------
//! Draw a whole series at once from a zero-noise Gaussian Process with
//! constant mean and a covariance chosen from a fixed catalog.
//!
//! Key behaviors
//! -------------
//! - [`GaussianProcess::covariance_matrix`] evaluates the kernel over every
//!   pair of timestamps, filling the upper triangle and mirroring it, so the
//!   result is exactly symmetric.
//! - [`Generator::sample_vectorized`] rejects a covariance with any NaN/±inf
//!   entry (`SynthError::NonFiniteCovariance`), then adds [`JITTER`] to the
//!   diagonal and draws one multivariate-normal sample (see [`mvn`]).
//! - Stepwise sampling is not supported: a single point has no meaningful
//!   draw independent of the rest of the batch.
//!
//! Invariants & assumptions
//! ------------------------
//! - The kernel is fixed at construction; nothing is mutated by sampling.
//! - Cost is O(N²) memory and O(N³) time in the number of timestamps.
//!
//! Downstream usage
//! ----------------
//! - Select a kernel either directly through [`KernelType`] or by name with
//!   `"Matern".parse::<KernelType>()`, then pass it with lengthscale,
//!   variance, and mean to [`GaussianProcess::new`].
//!
//! Testing notes
//! -------------
//! - Symmetry of the pre-jitter matrix is checked for every catalog entry.
//! - Closed-form kernel values and Bessel accuracy live in the submodules.
pub mod bessel;
pub mod kernel;
pub mod mvn;

pub use self::kernel::{Kernel, KernelType};

use crate::{
    errors::{SynthError, SynthResult},
    generators::{traits::Generator, validation::validate_finite},
};
use ndarray::{Array1, Array2, ArrayView1};
use rand::RngCore;

/// Diagonal jitter added before factorizing the covariance.
pub const JITTER: f64 = 1e-12;

/// GaussianProcess — vectorized-only GP signal.
///
/// Fields
/// ------
/// - `kernel`: covariance function bound to its lengthscale and variance.
/// - `mean`: constant mean of every marginal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianProcess {
    kernel: Kernel,
    mean: f64,
}

impl GaussianProcess {
    /// Construct a Gaussian Process.
    ///
    /// Errors
    /// ------
    /// - `SynthError::InvalidParameter` for a non-positive lengthscale, a
    ///   negative variance, a non-finite mean, or an out-of-range kernel shape
    ///   parameter.
    pub fn new(
        kind: KernelType, lengthscale: f64, variance: f64, mean: f64,
    ) -> SynthResult<Self> {
        Ok(GaussianProcess {
            kernel: Kernel::new(kind, lengthscale, variance)?,
            mean: validate_finite("mean", mean)?,
        })
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Pairwise covariance `C[i, j] = k(t_i, t_j)`, without jitter.
    pub fn covariance_matrix(&self, times: ArrayView1<'_, f64>) -> Array2<f64> {
        let n = times.len();
        let mut cov = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                let value = self.kernel.covariance(times[i], times[j]);
                cov[[i, j]] = value;
                cov[[j, i]] = value;
            }
        }
        cov
    }
}

impl Default for GaussianProcess {
    /// Squared-exponential kernel, unit lengthscale and variance, zero mean.
    fn default() -> Self {
        GaussianProcess { kernel: Kernel::default(), mean: 0.0 }
    }
}

impl Generator for GaussianProcess {
    fn name(&self) -> &'static str {
        "GaussianProcess"
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
        let mut cov = self.covariance_matrix(times);
        if let Some(((row, col), &value)) = cov.indexed_iter().find(|(_, c)| !c.is_finite()) {
            return Err(SynthError::NonFiniteCovariance { row, col, value });
        }
        cov.diag_mut().mapv_inplace(|c| c + JITTER);
        mvn::sample_mvn(self.mean, &cov, rng)
    }
}
