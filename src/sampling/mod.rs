//! sampling — timestamp grids for synthetic series.
//!
//! Purpose
//! -------
//! Decide when a synthetic series is observed. [`TimeSampler`] produces
//! evenly spaced grids (by count or by resolution) and irregular grids
//! (random subsampling plus Gaussian jitter) over a validated [`TimeRange`].
//!
//! Downstream usage
//! ----------------
//! - Build a grid here, then pass it to
//!   [`TimeSeries::sample`](crate::timeseries::TimeSeries::sample) or directly
//!   to a generator's sampling methods.

pub mod range;
pub mod time_sampler;

pub use self::range::TimeRange;
pub use self::time_sampler::TimeSampler;
