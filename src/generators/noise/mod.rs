//! noise — additive noise generators.
//!
//! - [`GaussianNoise`]: i.i.d. white noise, vectorizable.
//! - [`RedNoise`]: exponentially correlated noise, stepwise only.

pub mod gaussian;
pub mod red;

pub use self::gaussian::GaussianNoise;
pub use self::red::RedNoise;
