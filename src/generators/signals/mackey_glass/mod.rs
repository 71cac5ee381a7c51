//! mackey_glass — the Mackey-Glass delay-differential signal.
//!
//! Purpose
//! -------
//! Sample the solution of
//!
//! ```text
//! dx/dt = β · x(t - τ) / (1 + x(t - τ)^n) - γ · x(t)
//! ```
//!
//! after a deterministic burn-in, exposing sample time `t` as absolute time
//! `burn_in + t`.
//!
//! Key behaviors
//! -------------
//! - Construction validates the history, then integrates through the burn-in
//!   window (see [`integrator`]) and logs the step count and final state.
//! - Both sampling paths evaluate the same stored trajectory, extending it
//!   forward on demand. The generator is deterministic: no randomness is
//!   drawn, and stepwise and vectorized results agree exactly.
//! - Requested times whose absolute time precedes the integration start
//!   read the history polynomial.
//! - A NaN/±inf sample time is rejected with `SynthError::InvalidParameter`
//!   before any integration.
//!
//! Invariants & assumptions
//! ------------------------
//! - The trajectory only grows; evaluating an earlier time never re-runs the
//!   integrator.
//! - Integration cost is proportional to `(burn_in + t_max) / step`, and the
//!   whole trajectory is kept in memory.
//!
//! Downstream usage
//! ----------------
//! - `MackeyGlass::new(MackeyGlassOptions::default(), None)` gives the
//!   classic chaotic series with constant history 1 on `[-τ, 0]`.
//! - Pass `Some(History::new(anchors)?)` to start from caller-supplied
//!   `(time, value, derivative)` anchors.
pub mod history;
pub mod integrator;
pub mod options;

pub use self::history::{Anchor, History};
pub use self::options::MackeyGlassOptions;

use self::integrator::Trajectory;
use crate::{
    errors::SynthResult,
    generators::{traits::Generator, validation::validate_finite},
    logging,
};
use ndarray::{Array1, ArrayView1};
use rand::RngCore;
use slog::{Logger, debug};

/// MackeyGlass — delay-differential signal generator.
///
/// Fields
/// ------
/// - `trajectory`: history plus the integrated grid, extended lazily.
/// - `log`: receives burn-in and extension diagnostics.
#[derive(Debug, Clone)]
pub struct MackeyGlass {
    trajectory: Trajectory,
    burn_in: f64,
    log: Logger,
}

impl MackeyGlass {
    /// Construct the generator and run the burn-in.
    ///
    /// Parameters
    /// ----------
    /// - `options`: validated equation and integrator constants.
    /// - `history`: optional anchors; `None` uses constant 1 on `[-τ, 0]`.
    ///
    /// Errors
    /// ------
    /// - `SynthError::IntegratorDiverged` if the burn-in blows up.
    pub fn new(options: MackeyGlassOptions, history: Option<History>) -> SynthResult<Self> {
        Self::with_logger(options, history, logging::discard())
    }

    /// Same as [`MackeyGlass::new`], logging to `log`.
    pub fn with_logger(
        options: MackeyGlassOptions, history: Option<History>, log: Logger,
    ) -> SynthResult<Self> {
        let history = history.unwrap_or_else(|| History::constant(1.0, options.tau));
        let mut trajectory = Trajectory::new(options, history);
        trajectory.extend_to(options.burn_in)?;
        debug!(log, "mackey-glass burn-in complete";
            "steps" => trajectory.steps(), "time" => trajectory.end(),
            "state" => trajectory.value_at(options.burn_in));
        Ok(MackeyGlass { trajectory, burn_in: options.burn_in, log })
    }

    fn value_at(&mut self, time: f64) -> SynthResult<f64> {
        let absolute = self.burn_in + validate_finite("time", time)?;
        if absolute > self.trajectory.end() {
            let before = self.trajectory.steps();
            self.trajectory.extend_to(absolute)?;
            debug!(self.log, "mackey-glass trajectory extended";
                "steps" => self.trajectory.steps() - before, "end" => self.trajectory.end());
        }
        Ok(self.trajectory.value_at(absolute))
    }
}

impl Generator for MackeyGlass {
    fn name(&self) -> &'static str {
        "MackeyGlass"
    }

    fn is_vectorizable(&self) -> bool {
        true
    }

    fn sample_next(
        &mut self, time: f64, _samples: ArrayView1<'_, f64>, _errors: ArrayView1<'_, f64>,
        _rng: &mut dyn RngCore,
    ) -> SynthResult<f64> {
        self.value_at(time)
    }

    fn sample_vectorized(
        &mut self, times: ArrayView1<'_, f64>, _rng: &mut dyn RngCore,
    ) -> SynthResult<Array1<f64>> {
        if let Some(t_max) = times.iter().copied().reduce(f64::max) {
            self.value_at(t_max)?;
        }
        times.iter().map(|&t| self.value_at(t)).collect()
    }
}
