//! Harmonic shape functions for periodic signals.
use crate::errors::SynthError;
use std::str::FromStr;

/// Periodic function applied to the phase of a sinusoidal or pseudo-periodic
/// signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Harmonic {
    #[default]
    Sin,
    Cos,
    Tan,
}

impl Harmonic {
    /// Evaluate the function at phase `x` (radians).
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Harmonic::Sin => x.sin(),
            Harmonic::Cos => x.cos(),
            Harmonic::Tan => x.tan(),
        }
    }
}

impl FromStr for Harmonic {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sin" | "sine" => Ok(Harmonic::Sin),
            "cos" | "cosine" => Ok(Harmonic::Cos),
            "tan" | "tangent" => Ok(Harmonic::Tan),
            _ => Err(SynthError::UnknownHarmonic { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("SIN".parse::<Harmonic>(), Ok(Harmonic::Sin));
        assert_eq!("cosine".parse::<Harmonic>(), Ok(Harmonic::Cos));
        assert!(matches!("square".parse::<Harmonic>(), Err(SynthError::UnknownHarmonic { .. })));
    }

    #[test]
    fn apply_matches_std_functions() {
        let x = 0.3_f64;
        assert_eq!(Harmonic::Sin.apply(x), x.sin());
        assert_eq!(Harmonic::Cos.apply(x), x.cos());
        assert_eq!(Harmonic::Tan.apply(x), x.tan());
    }
}
