//! TimeSampler — regular and irregular timestamp grids.
//!
//! Purpose
//! -------
//! Decide *when* a synthetic series is observed. A [`TimeSampler`] lays out an
//! evenly spaced grid over its [`TimeRange`] and can turn it into an irregular
//! grid by random subsampling and Gaussian jitter of the kept timestamps.
//!
//! Key behaviors
//! -------------
//! - [`TimeSampler::sample_regular_time`] builds either a resolution-based
//!   grid on the half-open interval `[start, stop)` or a count-based grid on
//!   the closed interval `[start, stop]`. The two modes deliberately differ
//!   at the upper boundary.
//! - [`TimeSampler::sample_irregular_time`] keeps
//!   `round(keep_percentage / 100 · N)` of the `N` regular timestamps (chosen
//!   without replacement, order preserved), perturbs each by
//!   `Normal(0, resolution)`, and returns them sorted ascending.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returned grids are non-decreasing.
//! - The effective resolution of a count-based grid is `(stop - start) / N`
//!   (not `/(N - 1)`); this value scales the irregular jitter.
//! - Randomness comes only from the caller-supplied RNG, so seeding that RNG
//!   reproduces the grid exactly.
//!
//! Conventions
//! -----------
//! - When both `num_points` and `resolution` are supplied, `resolution` wins.
//! - Missing both is a `SynthError::MissingGridSpec`.
use crate::{
    errors::{SynthError, SynthResult},
    logging,
    sampling::range::TimeRange,
};
use ndarray::Array1;
use rand::RngCore;
use rand_distr::{Distribution, Normal};
use slog::{Logger, debug};

/// TimeSampler — produces timestamp sequences over a fixed time range.
///
/// Purpose
/// -------
/// Own a validated [`TimeRange`] and expose regular / irregular grid
/// construction over it.
///
/// Parameters
/// ----------
/// Constructed via [`TimeSampler::new`] with `start_time < stop_time`, or via
/// `TimeSampler::default()` for the `[0, 10]` range.
///
/// Fields
/// ------
/// - `range`: [`TimeRange`]
///   Validated start/stop bounds.
/// - `log`: `slog::Logger`
///   Diagnostic sink; discards records unless replaced via
///   [`TimeSampler::with_logger`].
///
/// Performance
/// -----------
/// - Regular grids are O(N). Irregular grids add an O(N log N) sort.
#[derive(Debug, Clone)]
pub struct TimeSampler {
    range: TimeRange,
    log: Logger,
}

impl TimeSampler {
    /// Construct a sampler over `[start_time, stop_time]`.
    ///
    /// Errors
    /// ------
    /// - `SynthError::InvalidTimeRange` when the bounds are not finite or
    ///   `start_time >= stop_time`.
    pub fn new(start_time: f64, stop_time: f64) -> SynthResult<Self> {
        Ok(TimeSampler { range: TimeRange::new(start_time, stop_time)?, log: logging::discard() })
    }

    /// Construct a sampler from an already validated range.
    pub fn from_range(range: TimeRange) -> Self {
        TimeSampler { range, log: logging::discard() }
    }

    /// Attach a logger for grid diagnostics.
    pub fn with_logger(mut self, log: Logger) -> Self {
        self.log = log;
        self
    }

    /// Time range this sampler lays grids over.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Regularly spaced timestamps.
    ///
    /// Parameters
    /// ----------
    /// - `num_points`: `Option<usize>`
    ///   Number of evenly spaced points spanning `[start, stop]`, both ends
    ///   included. Must be ≥ 1; a single point yields `[start]`.
    /// - `resolution`: `Option<f64>`
    ///   Spacing of a grid `start, start + resolution, …` kept strictly below
    ///   `stop`. Takes priority over `num_points`.
    ///
    /// Errors
    /// ------
    /// - `SynthError::MissingGridSpec` if both arguments are `None`.
    /// - `SynthError::InvalidResolution` if `resolution` is not finite or ≤ 0.
    /// - `SynthError::InvalidNumPoints` if `num_points == 0`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_timesynth::sampling::TimeSampler;
    /// let sampler = TimeSampler::new(0.0, 1.0).unwrap();
    /// let by_res = sampler.sample_regular_time(None, Some(0.25)).unwrap();
    /// assert_eq!(by_res.to_vec(), vec![0.0, 0.25, 0.5, 0.75]);
    ///
    /// let by_count = sampler.sample_regular_time(Some(5), None).unwrap();
    /// assert_eq!(by_count.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    /// ```
    pub fn sample_regular_time(
        &self, num_points: Option<usize>, resolution: Option<f64>,
    ) -> SynthResult<Array1<f64>> {
        let (grid, _) = self.regular_grid(num_points, resolution)?;
        Ok(grid)
    }

    /// Irregularly spaced timestamps.
    ///
    /// Builds the regular grid of [`TimeSampler::sample_regular_time`], keeps
    /// `round(keep_percentage / 100 · N)` of its `N` points chosen uniformly
    /// without replacement, adds independent `Normal(0, resolution)` jitter to
    /// every kept point, and sorts the result ascending.
    ///
    /// Parameters
    /// ----------
    /// - `num_points`, `resolution`: as for the regular grid. For a
    ///   count-based grid the jitter scale is `(stop - start) / num_points`.
    /// - `keep_percentage`: `f64`
    ///   Share of grid points to retain, in `[0, 100]`.
    /// - `rng`: source of randomness for index selection and jitter.
    ///
    /// Errors
    /// ------
    /// - Every error of the regular grid.
    /// - `SynthError::InvalidKeepPercentage` if `keep_percentage` is NaN or
    ///   outside `[0, 100]`.
    pub fn sample_irregular_time(
        &self, num_points: Option<usize>, resolution: Option<f64>, keep_percentage: f64,
        rng: &mut dyn RngCore,
    ) -> SynthResult<Array1<f64>> {
        if !(0.0..=100.0).contains(&keep_percentage) {
            return Err(SynthError::InvalidKeepPercentage { value: keep_percentage });
        }
        let (grid, effective_resolution) = self.regular_grid(num_points, resolution)?;
        let n = grid.len();
        let keep = ((keep_percentage / 100.0 * n as f64).round() as usize).min(n);

        let mut indices = rand::seq::index::sample(&mut *rng, n, keep).into_vec();
        indices.sort_unstable();

        let jitter = Normal::new(0.0, effective_resolution)
            .map_err(|_| SynthError::InvalidResolution { value: effective_resolution })?;
        let mut times: Vec<f64> =
            indices.into_iter().map(|i| grid[i] + jitter.sample(&mut *rng)).collect();
        times.sort_unstable_by(f64::total_cmp);

        debug!(self.log, "irregular grid";
            "grid_points" => n, "kept" => keep, "resolution" => effective_resolution);
        Ok(Array1::from(times))
    }

    /// Build the regular grid and report its effective resolution.
    fn regular_grid(
        &self, num_points: Option<usize>, resolution: Option<f64>,
    ) -> SynthResult<(Array1<f64>, f64)> {
        let TimeRange { start, stop } = self.range;
        match (num_points, resolution) {
            (_, Some(res)) => {
                if !res.is_finite() || res <= 0.0 {
                    return Err(SynthError::InvalidResolution { value: res });
                }
                let grid: Vec<f64> =
                    (0_u64..).map(|i| start + i as f64 * res).take_while(|&t| t < stop).collect();
                Ok((Array1::from(grid), res))
            }
            (Some(n), None) => {
                if n == 0 {
                    return Err(SynthError::InvalidNumPoints { value: n });
                }
                Ok((linspace_inclusive(start, stop, n), self.range.span() / n as f64))
            }
            (None, None) => Err(SynthError::MissingGridSpec),
        }
    }
}

impl Default for TimeSampler {
    fn default() -> Self {
        TimeSampler::from_range(TimeRange::default())
    }
}

/// `n` evenly spaced points with both endpoints hit exactly.
fn linspace_inclusive(start: f64, stop: f64, n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from(vec![start]);
    }
    let step = (stop - start) / (n - 1) as f64;
    Array1::from_iter((0..n).map(|i| if i == n - 1 { stop } else { start + i as f64 * step }))
}
