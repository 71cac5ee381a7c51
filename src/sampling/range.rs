//! Time range for timestamp sampling — validated `[start, stop]` bounds.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the start/stop times used by
//! [`TimeSampler`](crate::sampling::TimeSampler) so grid construction can
//! assume a finite, non-empty interval.
//!
//! Invariants & assumptions
//! ------------------------
//! - `start < stop`.
//! - Both bounds are finite.
//!
//! Conventions
//! -----------
//! - The default range is `[0, 10]`.
//! - Invalid configurations return `SynthError::InvalidTimeRange` rather than
//!   panicking.
use crate::errors::{SynthError, SynthResult};

/// TimeRange — start/stop bounds of a sampled time grid.
///
/// Purpose
/// -------
/// Represent a validated interval of time over which regular and irregular
/// grids are laid out.
///
/// Fields
/// ------
/// - `start`: `f64`
///   First timestamp of any grid built on this range.
/// - `stop`: `f64`
///   Upper end of the range. Included by count-based grids, excluded by
///   resolution-based grids.
///
/// Invariants
/// ----------
/// - `start < stop`, both finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    /// First timestamp of the range.
    pub start: f64,
    /// Upper end of the range (must be > `start`).
    pub stop: f64,
}

impl TimeRange {
    /// Construct validated time bounds.
    ///
    /// Errors
    /// ------
    /// - `SynthError::InvalidTimeRange`
    ///   Returned when either bound is not finite or `start >= stop`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_timesynth::sampling::TimeRange;
    /// let range = TimeRange::new(0.0, 20.0).unwrap();
    /// assert_eq!(range.span(), 20.0);
    ///
    /// assert!(TimeRange::new(5.0, 5.0).is_err());
    /// ```
    pub fn new(start: f64, stop: f64) -> SynthResult<Self> {
        if !start.is_finite() || !stop.is_finite() || start >= stop {
            return Err(SynthError::InvalidTimeRange { start, stop });
        }
        Ok(TimeRange { start, stop })
    }

    /// Length of the interval, `stop - start` (strictly positive).
    pub fn span(&self) -> f64 {
        self.stop - self.start
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange { start: 0.0, stop: 10.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation behavior of `TimeRange::new` for ordered, reversed, empty,
    //   and non-finite bounds.
    // - The documented default range.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that ordered finite bounds are accepted unchanged.
    //
    // Given
    // -----
    // - `start = -2.5`, `stop = 7.5`.
    //
    // Expect
    // ------
    // - Fields equal the inputs and `span() == 10`.
    fn timerange_new_accepts_ordered_bounds() {
        // Arrange / Act
        let range = TimeRange::new(-2.5, 7.5).expect("ordered finite bounds should construct");

        // Assert
        assert_eq!(range.start, -2.5);
        assert_eq!(range.stop, 7.5);
        assert_eq!(range.span(), 10.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure reversed, empty, and non-finite ranges are rejected with their payload.
    //
    // Given
    // -----
    // - `(3, 1)`, `(1, 1)`, and `(0, +inf)`.
    //
    // Expect
    // ------
    // - Each returns `SynthError::InvalidTimeRange` carrying the inputs.
    fn timerange_new_rejects_invalid_bounds() {
        for (start, stop) in [(3.0, 1.0), (1.0, 1.0), (0.0, f64::INFINITY)] {
            let err = TimeRange::new(start, stop).expect_err("invalid range must be rejected");
            assert_eq!(err, SynthError::InvalidTimeRange { start, stop });
        }
    }

    #[test]
    // Purpose
    // -------
    // The default range spans `[0, 10]`.
    fn timerange_default_is_zero_to_ten() {
        let range = TimeRange::default();
        assert_eq!((range.start, range.stop), (0.0, 10.0));
    }
}
