//! Fixed-step RK4 method of steps with cubic Hermite dense output.
//!
//! Purpose
//! -------
//! Integrate the Mackey-Glass delay equation forward from the last history
//! anchor on the fixed grid `t_k = t0 + k·h`, keeping the whole trajectory so
//! any earlier time can be evaluated, including the delayed arguments the
//! integrator itself needs.
//!
//! Key behaviors
//! -------------
//! - Each grid point stores `(x_k, f(t_k, x_k))`. Between grid points the
//!   solution is the cubic Hermite interpolant of the two neighbors, which is
//!   what every RK4 stage reads for `x(t - τ)`.
//! - Because `h ≤ τ`, the delayed time of every stage is at most `t_k`, so it
//!   falls in the history or in the already-integrated trajectory.
//! - [`Trajectory::extend_to`] integrates lazily; evaluation order does not
//!   change results since the grid is fixed.
//!
//! Invariants & assumptions
//! ------------------------
//! - `values.len() == derivatives.len() ≥ 1`; index 0 is the last anchor.
//! - A NaN/±inf state stops integration with
//!   `SynthError::IntegratorDiverged`, and the offending point is not stored.
use super::{
    history::{History, hermite},
    options::MackeyGlassOptions,
};
use crate::{
    errors::{SynthError, SynthResult},
    generators::validation::validate_finite,
};

/// Trajectory — history plus the integrated grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    options: MackeyGlassOptions,
    history: History,
    start: f64,
    values: Vec<f64>,
    derivatives: Vec<f64>,
}

impl Trajectory {
    /// Seed the grid at the last history anchor.
    pub fn new(options: MackeyGlassOptions, history: History) -> Self {
        let anchor = history.last();
        let mut trajectory = Trajectory {
            options,
            history,
            start: anchor.time,
            values: vec![anchor.value],
            derivatives: Vec::with_capacity(1),
        };
        let d0 = trajectory.rhs(anchor.time, anchor.value);
        trajectory.derivatives.push(d0);
        trajectory
    }

    /// Time of the last integrated grid point.
    pub fn end(&self) -> f64 {
        self.time_at(self.values.len() - 1)
    }

    /// Number of RK4 steps taken so far.
    pub fn steps(&self) -> usize {
        self.values.len() - 1
    }

    /// Integrate forward until the grid covers `target`.
    ///
    /// Errors
    /// ------
    /// - `SynthError::InvalidParameter` if `target` is NaN/±inf.
    /// - `SynthError::IntegratorDiverged` on a non-finite state.
    pub fn extend_to(&mut self, target: f64) -> SynthResult<()> {
        validate_finite("time", target)?;
        while self.end() < target {
            self.step()?;
        }
        Ok(())
    }

    /// Solution at `time`. Times before the grid start read the history;
    /// times past [`Trajectory::end`] are clamped to the last grid value and
    /// should be preceded by [`Trajectory::extend_to`].
    pub fn value_at(&self, time: f64) -> f64 {
        if time <= self.start {
            return self.history.value_at(time);
        }
        let h = self.options.step;
        let last = self.values.len() - 1;
        let k = ((time - self.start) / h).floor() as usize;
        if k >= last {
            return self.values[last];
        }
        let theta = (time - self.time_at(k)) / h;
        hermite(
            self.values[k],
            self.derivatives[k],
            self.values[k + 1],
            self.derivatives[k + 1],
            h,
            theta,
        )
    }

    #[inline]
    fn time_at(&self, k: usize) -> f64 {
        self.start + k as f64 * self.options.step
    }

    /// Right-hand side `β x_τ / (1 + x_τ^n) - γ x`.
    fn rhs(&self, time: f64, x: f64) -> f64 {
        let MackeyGlassOptions { tau, n, beta, gamma, .. } = self.options;
        let delayed = self.value_at(time - tau);
        beta * delayed / (1.0 + delayed.powf(n)) - gamma * x
    }

    /// One classical RK4 step from the last grid point.
    fn step(&mut self) -> SynthResult<()> {
        let k = self.values.len() - 1;
        let h = self.options.step;
        let t = self.time_at(k);
        let x = self.values[k];

        let k1 = self.derivatives[k];
        let k2 = self.rhs(t + 0.5 * h, x + 0.5 * h * k1);
        let k3 = self.rhs(t + 0.5 * h, x + 0.5 * h * k2);
        let k4 = self.rhs(t + h, x + h * k3);
        let next = x + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);

        let next_time = self.time_at(k + 1);
        let next_derivative = self.rhs(next_time, next);
        if !next.is_finite() || !next_derivative.is_finite() {
            return Err(SynthError::IntegratorDiverged { time: next_time, value: next });
        }
        self.values.push(next);
        self.derivatives.push(next_derivative);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accuracy on the pure-decay case (β = 0), which has a closed form.
    // - History reads before the grid start.
    // - Lazy extension (grid end and step count).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // With β = 0 the equation is dx/dt = -γx, so x(t) = e^{-γt} from x(0) = 1.
    //
    // Given
    // -----
    // - γ = 0.3, τ = 2, h = 0.05, constant history 1.
    //
    // Expect
    // ------
    // - Grid and off-grid values match the exponential to 1e-8.
    fn pure_decay_matches_exponential() {
        // Arrange
        let options = MackeyGlassOptions::new(2.0, 10.0, 0.0, 0.3, 0.0, 0.05).expect("valid");
        let mut trajectory = Trajectory::new(options, History::constant(1.0, 2.0));

        // Act
        trajectory.extend_to(10.0).expect("no divergence");

        // Assert
        for t in [0.05, 1.0, 3.333, 7.91, 10.0] {
            assert_relative_eq!(trajectory.value_at(t), (-0.3 * t).exp(), max_relative = 1e-8);
        }
    }

    #[test]
    fn refuses_to_extend_to_infinity() {
        let options = MackeyGlassOptions::new(1.0, 10.0, 0.2, 0.1, 0.0, 0.25).expect("valid");
        let mut trajectory = Trajectory::new(options, History::constant(0.5, 1.0));
        let err = trajectory.extend_to(f64::INFINITY).expect_err("unbounded target");
        assert!(matches!(err, SynthError::InvalidParameter { name: "time", .. }));
        assert_eq!(trajectory.steps(), 0);
    }

    #[test]
    fn reads_history_before_start() {
        let options = MackeyGlassOptions::default();
        let trajectory = Trajectory::new(options, History::constant(1.0, options.tau));
        assert_relative_eq!(trajectory.value_at(-3.0), 1.0, epsilon = 1e-15);
        assert_eq!(trajectory.steps(), 0);
    }

    #[test]
    fn extends_lazily_to_cover_target() {
        let options = MackeyGlassOptions::new(1.0, 10.0, 0.2, 0.1, 0.0, 0.25).expect("valid");
        let mut trajectory = Trajectory::new(options, History::constant(0.5, 1.0));
        trajectory.extend_to(2.1).expect("no divergence");
        assert_eq!(trajectory.steps(), 9);
        assert!(trajectory.end() >= 2.1);
    }
}
