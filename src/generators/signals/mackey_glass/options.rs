//! Mackey-Glass options — parameters of the delay equation and its integrator.
//!
//! Purpose
//! -------
//! Collect the constants of
//!
//! ```text
//! dx/dt = β · x(t - τ) / (1 + x(t - τ)^n) - γ · x(t)
//! ```
//!
//! together with the burn-in length and the fixed integration step, validated
//! once so the integrator can assume them.
//!
//! Invariants & assumptions
//! ------------------------
//! - `tau > 0`, `n > 0`, `beta` finite, `gamma ≥ 0`, `burn_in ≥ 0`.
//! - `0 < step ≤ tau`, so every delayed value an RK4 stage needs lies at or
//!   before the current grid point and is already known.
//!
//! Conventions
//! -----------
//! - Defaults reproduce the classic chaotic regime: τ = 17, n = 10, β = 0.2,
//!   γ = 0.1, with 500 time units of burn-in at step 0.01.
use crate::{
    errors::{SynthError, SynthResult},
    generators::validation::{validate_finite, validate_positive, validate_spread},
};

/// MackeyGlassOptions — validated configuration for [`super::MackeyGlass`].
///
/// Fields
/// ------
/// - `tau`: delay τ.
/// - `n`: exponent of the feedback nonlinearity.
/// - `beta`: feedback gain β.
/// - `gamma`: decay rate γ.
/// - `burn_in`: time integrated before the first exposed sample; sample time
///   `t` maps to absolute time `burn_in + t`.
/// - `step`: fixed RK4 step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MackeyGlassOptions {
    pub tau: f64,
    pub n: f64,
    pub beta: f64,
    pub gamma: f64,
    pub burn_in: f64,
    pub step: f64,
}

impl MackeyGlassOptions {
    /// Construct and validate options.
    ///
    /// Errors
    /// ------
    /// - `SynthError::InvalidParameter` for any field outside its range,
    ///   including `step > tau`.
    pub fn new(
        tau: f64, n: f64, beta: f64, gamma: f64, burn_in: f64, step: f64,
    ) -> SynthResult<Self> {
        let tau = validate_positive("tau", tau)?;
        let step = validate_positive("step", step)?;
        if step > tau {
            return Err(SynthError::InvalidParameter {
                name: "step",
                value: step,
                reason: "Must not exceed tau.",
            });
        }
        Ok(MackeyGlassOptions {
            tau,
            n: validate_positive("n", n)?,
            beta: validate_finite("beta", beta)?,
            gamma: validate_spread("gamma", gamma)?,
            burn_in: validate_spread("burn_in", burn_in)?,
            step,
        })
    }
}

impl Default for MackeyGlassOptions {
    fn default() -> Self {
        MackeyGlassOptions { tau: 17.0, n: 10.0, beta: 0.2, gamma: 0.1, burn_in: 500.0, step: 0.01 }
    }
}
