//! generators — the generator contract and the signal/noise family.
//!
//! Purpose
//! -------
//! Host every model a [`TimeSeries`](crate::timeseries::TimeSeries) can
//! compose, behind the single [`Generator`] trait.
//!
//! Key behaviors
//! -------------
//! - [`traits`] defines the contract: stepwise and vectorized sampling, each
//!   independently supported or not, with `NotSupported` as the fallback.
//! - [`noise`] holds additive noise models; [`signals`] holds signal models.
//! - [`validation`], [`draws`], and [`harmonic`] are shared building blocks
//!   for constructors and sampling rules.
//!
//! Conventions
//! -----------
//! - Constructors validate eagerly and return `SynthResult<Self>`; `Default`
//!   impls carry the documented defaults without re-validating.
//! - Randomness always arrives as `&mut dyn RngCore` at call time.
//!
//! | Generator         | Stepwise | Vectorized | Stateful |
//! |-------------------|----------|------------|----------|
//! | `GaussianNoise`   | yes      | yes        | no       |
//! | `RedNoise`        | yes      | no         | yes      |
//! | `Constant`        | yes      | yes        | no       |
//! | `Sinusoidal`      | yes      | yes        | no       |
//! | `PseudoPeriodic`  | yes      | yes        | no       |
//! | `AutoRegressive`  | yes      | no         | yes      |
//! | `CAR`             | yes      | no         | yes      |
//! | `NARMA`           | no       | yes        | seed     |
//! | `GaussianProcess` | no       | yes        | no       |
//! | `MackeyGlass`     | yes      | yes        | cache    |

pub(crate) mod draws;
pub mod harmonic;
pub mod noise;
pub mod signals;
pub mod traits;
pub mod validation;

pub use self::harmonic::Harmonic;
pub use self::traits::Generator;
