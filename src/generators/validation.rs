//! Generator validation helpers — reusable checks for construction parameters.
//!
//! Purpose
//! -------
//! Centralize the small checks every generator constructor performs so that
//! malformed parameters fail at construction time with a structured
//! [`SynthError`] instead of surfacing later as NaNs.
//!
//! Conventions
//! -----------
//! - Each helper returns the validated value (or `()`) and never panics.
//! - `name` is the public parameter name, echoed in the error message.
use crate::errors::{SynthError, SynthResult};

/// Require a finite value.
pub fn validate_finite(name: &'static str, value: f64) -> SynthResult<f64> {
    if !value.is_finite() {
        return Err(SynthError::InvalidParameter { name, value, reason: "Must be finite." });
    }
    Ok(value)
}

/// Require a finite, non-negative spread (standard deviation or sigma).
pub fn validate_spread(name: &'static str, value: f64) -> SynthResult<f64> {
    validate_finite(name, value)?;
    if value < 0.0 {
        return Err(SynthError::InvalidParameter { name, value, reason: "Must be non-negative." });
    }
    Ok(value)
}

/// Require a finite, strictly positive value.
pub fn validate_positive(name: &'static str, value: f64) -> SynthResult<f64> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(SynthError::InvalidParameter {
            name,
            value,
            reason: "Must be strictly positive.",
        });
    }
    Ok(value)
}

/// Require `actual == expected` for an array parameter.
pub fn validate_length(name: &'static str, expected: usize, actual: usize) -> SynthResult<()> {
    if expected != actual {
        return Err(SynthError::LengthMismatch { name, expected, actual });
    }
    Ok(())
}

/// Require every entry of an array parameter to be finite.
pub fn validate_all_finite(name: &'static str, values: &[f64]) -> SynthResult<()> {
    values.iter().try_for_each(|&v| validate_finite(name, v).map(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Boundary behavior of each helper: zero, negative, NaN/inf, and length
    // off-by-one.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Spreads accept zero but reject negatives and non-finite values.
    fn spread_accepts_zero_rejects_negative_and_nan() {
        assert_eq!(validate_spread("std", 0.0), Ok(0.0));
        assert!(validate_spread("std", -1e-9).is_err());
        assert!(validate_spread("std", f64::NAN).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Positive parameters reject zero.
    fn positive_rejects_zero() {
        let err = validate_positive("tau", 0.0).expect_err("zero is not positive");
        assert!(matches!(err, SynthError::InvalidParameter { name: "tau", .. }));
    }

    #[test]
    // Purpose
    // -------
    // Length mismatches carry both lengths; finite scan stops on the first bad entry.
    fn length_and_finite_scan() {
        assert_eq!(
            validate_length("coefficients", 4, 3),
            Err(SynthError::LengthMismatch { name: "coefficients", expected: 4, actual: 3 })
        );
        assert!(validate_all_finite("initial_condition", &[0.0, 1.0]).is_ok());
        assert!(validate_all_finite("initial_condition", &[0.0, f64::INFINITY]).is_err());
    }
}
