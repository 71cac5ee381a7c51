//! Covariance kernels for the Gaussian Process signal.
//!
//! This module provides:
//! - A `KernelType` enum naming the catalog (Constant, Exponential,
//!   Squared-Exponential, Rational-Quadratic, Linear, Matérn, Periodic), each
//!   variant carrying its own shape parameters.
//! - A validated [`Kernel`] that closes over `lengthscale` and `variance` and
//!   evaluates `k(x1, x2)`.
//!
//! Conventions:
//! - `r = x1 - x2`, `l` = lengthscale, `σ²` = variance.
//! - Every stationary kernel depends on `|r|` only, so `k(x1, x2) == k(x2, x1)`
//!   holds exactly in floating point. Linear uses a commutative product.
use super::bessel::ln_bessel_k;
use crate::{
    errors::{SynthError, SynthResult},
    generators::validation::{validate_finite, validate_positive, validate_spread},
};
use statrs::function::gamma::ln_gamma;
use std::{f64::consts::PI, str::FromStr};

/// Scaled distances below this are treated as zero by the Matérn kernel,
/// where `x^ν · K_ν(x)` has the limit `2^(ν-1) Γ(ν)`.
const MATERN_ZERO: f64 = 1e-12;

/// Gaussian Process covariance family.
///
/// - `Constant`: `σ²` everywhere.
/// - `Exponential { gamma }`: `σ² exp(-(|r|/l)^γ)`, γ ∈ (0, 2]; γ = 1 is the
///   Ornstein–Uhlenbeck kernel.
/// - `SquaredExponential`: `σ² exp(-r² / 2l²)`.
/// - `RationalQuadratic { alpha }`: `σ² (1 + r² / 2αl²)^(-α)`.
/// - `Linear { c, offset }`: `σ² (x1 - c)(x2 - c) + offset`.
/// - `Matern { nu }`: `σ² 2^(1-ν)/Γ(ν) · (√(2ν)|r|/l)^ν · K_ν(√(2ν)|r|/l)`.
/// - `Periodic { p }`: `σ² exp(-2 sin²(π|r|/p) / l²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelType {
    Constant,
    Exponential { gamma: f64 },
    SquaredExponential,
    RationalQuadratic { alpha: f64 },
    Linear { c: f64, offset: f64 },
    Matern { nu: f64 },
    Periodic { p: f64 },
}

impl KernelType {
    /// Short catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            KernelType::Constant => "Constant",
            KernelType::Exponential { .. } => "Exponential",
            KernelType::SquaredExponential => "SE",
            KernelType::RationalQuadratic { .. } => "RQ",
            KernelType::Linear { .. } => "Linear",
            KernelType::Matern { .. } => "Matern",
            KernelType::Periodic { .. } => "Periodic",
        }
    }

    fn validate(self) -> SynthResult<Self> {
        match self {
            KernelType::Exponential { gamma } => {
                validate_positive("gamma", gamma)?;
                if gamma > 2.0 {
                    return Err(SynthError::InvalidParameter {
                        name: "gamma",
                        value: gamma,
                        reason: "Must lie in (0, 2].",
                    });
                }
            }
            KernelType::RationalQuadratic { alpha } => {
                validate_positive("alpha", alpha)?;
            }
            KernelType::Linear { c, offset } => {
                validate_finite("c", c)?;
                validate_spread("offset", offset)?;
            }
            KernelType::Matern { nu } => {
                validate_positive("nu", nu)?;
            }
            KernelType::Periodic { p } => {
                validate_positive("p", p)?;
            }
            KernelType::Constant | KernelType::SquaredExponential => {}
        }
        Ok(self)
    }
}

impl FromStr for KernelType {
    type Err = SynthError;

    /// Look up a kernel by name with default shape parameters
    /// (γ = 1, α = 1, c = 1, offset = 0, ν = 2.5, p = 1).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "constant" => Ok(KernelType::Constant),
            "exponential" | "ou" => Ok(KernelType::Exponential { gamma: 1.0 }),
            "se" | "squaredexponential" | "squared_exponential" | "rbf" => {
                Ok(KernelType::SquaredExponential)
            }
            "rq" | "rationalquadratic" | "rational_quadratic" => {
                Ok(KernelType::RationalQuadratic { alpha: 1.0 })
            }
            "linear" => Ok(KernelType::Linear { c: 1.0, offset: 0.0 }),
            "matern" => Ok(KernelType::Matern { nu: 2.5 }),
            "periodic" => Ok(KernelType::Periodic { p: 1.0 }),
            _ => Err(SynthError::UnknownKernel { name: s.to_string() }),
        }
    }
}

/// Kernel — a catalog entry bound to its lengthscale and variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    kind: KernelType,
    lengthscale: f64,
    variance: f64,
}

impl Default for Kernel {
    /// Squared-exponential with unit lengthscale and variance.
    fn default() -> Self {
        Kernel { kind: KernelType::SquaredExponential, lengthscale: 1.0, variance: 1.0 }
    }
}

impl Kernel {
    /// # Errors
    /// - `SynthError::InvalidParameter` if `lengthscale ≤ 0`, `variance < 0`,
    ///   or a shape parameter is outside its range.
    pub fn new(kind: KernelType, lengthscale: f64, variance: f64) -> SynthResult<Self> {
        Ok(Kernel {
            kind: kind.validate()?,
            lengthscale: validate_positive("lengthscale", lengthscale)?,
            variance: validate_spread("variance", variance)?,
        })
    }

    pub fn kind(&self) -> KernelType {
        self.kind
    }

    /// Covariance between timestamps `x1` and `x2`.
    pub fn covariance(&self, x1: f64, x2: f64) -> f64 {
        let l = self.lengthscale;
        let var = self.variance;
        let r = (x1 - x2).abs();
        match self.kind {
            KernelType::Constant => var,
            KernelType::Exponential { gamma } => var * (-(r / l).powf(gamma)).exp(),
            KernelType::SquaredExponential => var * (-(r * r) / (2.0 * l * l)).exp(),
            KernelType::RationalQuadratic { alpha } => {
                var * (1.0 + r * r / (2.0 * alpha * l * l)).powf(-alpha)
            }
            KernelType::Linear { c, offset } => var * (x1 - c) * (x2 - c) + offset,
            KernelType::Matern { nu } => {
                let scaled = (2.0 * nu).sqrt() * r / l;
                if scaled < MATERN_ZERO {
                    return var;
                }
                if var == 0.0 {
                    return 0.0;
                }
                // 2^(1-ν)/Γ(ν) · s^ν · K_ν(s), assembled in log space.
                let ln_k = (1.0 - nu) * 2f64.ln() - ln_gamma(nu)
                    + nu * scaled.ln()
                    + ln_bessel_k(nu, scaled);
                var * ln_k.exp()
            }
            KernelType::Periodic { p } => {
                let s = (PI * r / p).sin();
                var * (-2.0 * s * s / (l * l)).exp()
            }
        }
    }
}
