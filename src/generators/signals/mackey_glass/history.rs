//! Initial history of a delay equation, given as Hermite anchors.
//!
//! A history is a list of `(time, value, derivative)` anchors with strictly
//! increasing times. Between two anchors the history is the cubic Hermite
//! polynomial matching both values and derivatives; before the first anchor
//! it extends linearly along the first anchor's derivative. Integration
//! starts at the last anchor.
use crate::errors::{SynthError, SynthResult};

/// One `(time, value, derivative)` history anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub time: f64,
    pub value: f64,
    pub derivative: f64,
}

impl Anchor {
    pub fn new(time: f64, value: f64, derivative: f64) -> Self {
        Anchor { time, value, derivative }
    }
}

/// History — validated, time-ordered anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    anchors: Vec<Anchor>,
}

impl History {
    /// # Errors
    /// - `SynthError::InvalidHistory` if `anchors` is empty, an entry is not
    ///   finite, or times are not strictly increasing.
    pub fn new(anchors: Vec<Anchor>) -> SynthResult<Self> {
        if anchors.is_empty() {
            return Err(SynthError::InvalidHistory { index: 0, reason: "History is empty." });
        }
        for (index, anchor) in anchors.iter().enumerate() {
            if !(anchor.time.is_finite()
                && anchor.value.is_finite()
                && anchor.derivative.is_finite())
            {
                return Err(SynthError::InvalidHistory { index, reason: "Entries must be finite." });
            }
            if index > 0 && anchor.time <= anchors[index - 1].time {
                return Err(SynthError::InvalidHistory {
                    index,
                    reason: "Times must be strictly increasing.",
                });
            }
        }
        Ok(History { anchors })
    }

    /// Constant history `value` on `[-tau, 0]`; `tau > 0`.
    pub(crate) fn constant(value: f64, tau: f64) -> Self {
        History { anchors: vec![Anchor::new(-tau, value, 0.0), Anchor::new(0.0, value, 0.0)] }
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// The anchor integration starts from.
    pub fn last(&self) -> Anchor {
        self.anchors[self.anchors.len() - 1]
    }

    /// Evaluate the history at `time`.
    pub fn value_at(&self, time: f64) -> f64 {
        let first = self.anchors[0];
        if time <= first.time {
            return first.value + first.derivative * (time - first.time);
        }
        // Index of the first anchor strictly after `time`.
        let upper = self.anchors.partition_point(|a| a.time <= time);
        if upper == self.anchors.len() {
            let last = self.last();
            return last.value + last.derivative * (time - last.time);
        }
        let (left, right) = (self.anchors[upper - 1], self.anchors[upper]);
        hermite(
            left.value,
            left.derivative,
            right.value,
            right.derivative,
            right.time - left.time,
            (time - left.time) / (right.time - left.time),
        )
    }
}

/// Cubic Hermite interpolant on a segment of width `h` at fraction `theta`.
#[inline]
pub(crate) fn hermite(x0: f64, d0: f64, x1: f64, d1: f64, h: f64, theta: f64) -> f64 {
    let t2 = theta * theta;
    let t3 = t2 * theta;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + theta;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    h00 * x0 + h10 * h * d0 + h01 * x1 + h11 * h * d1
}
