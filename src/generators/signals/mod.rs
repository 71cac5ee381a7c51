//! signals — signal generators.
//!
//! Stateless closed forms ([`Constant`], [`Sinusoidal`], [`PseudoPeriodic`]),
//! batch processes ([`NARMA`], [`GaussianProcess`]), a deterministic delay
//! equation ([`MackeyGlass`]), and step-only recurrences ([`AutoRegressive`],
//! [`CAR`]).

pub mod ar;
pub mod car;
pub mod constant;
pub mod gaussian_process;
pub mod mackey_glass;
pub mod narma;
pub mod pseudoperiodic;
pub mod sinusoidal;

pub use self::ar::AutoRegressive;
pub use self::car::CAR;
pub use self::constant::Constant;
pub use self::gaussian_process::{GaussianProcess, Kernel, KernelType};
pub use self::mackey_glass::{Anchor, History, MackeyGlass, MackeyGlassOptions};
pub use self::narma::NARMA;
pub use self::pseudoperiodic::PseudoPeriodic;
pub use self::sinusoidal::Sinusoidal;
