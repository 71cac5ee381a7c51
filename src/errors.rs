//! errors — crate-wide error type for samplers, generators, and the composer.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`SynthError`], and the [`SynthResult`] alias
//! used by every public entry point of the crate. Each variant carries the
//! offending value (or a short static reason) so callers can diagnose bad
//! inputs without re-deriving them.
//!
//! Key behaviors
//! -------------
//! - Group variants into three families exposed through [`ErrorKind`]:
//!   configuration problems (bad or missing parameters), unsupported
//!   operations (a generator asked for a sampling mode it does not define),
//!   and numerical failures (non-PSD covariance, divergent recursions).
//! - Attach human-readable `Display` messages to each variant.
//! - Convert into `PyErr` at the PyO3 boundary when the `python-bindings`
//!   feature is enabled.
//!
//! Conventions
//! -----------
//! - Errors are raised at the point of detection: construction time for
//!   malformed parameters, call time for unsupported operations. Nothing is
//!   retried or swallowed.
//! - Indices are 0-based.
#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyArithmeticError, PyNotImplementedError, PyValueError},
};

/// Crate-wide result alias for operations that may produce [`SynthError`].
pub type SynthResult<T> = Result<T, SynthError>;

/// Coarse classification of a [`SynthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or missing construction/call parameters.
    Configuration,
    /// Operation not defined for this generator variant.
    NotSupported,
    /// Numerical failure detected while sampling.
    Numerical,
}

/// Unified error type for synthetic time-series generation.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    // ---- Time grid configuration ----
    /// Neither `num_points` nor `resolution` was supplied.
    MissingGridSpec,

    /// Start/stop times must be finite with start < stop.
    InvalidTimeRange { start: f64, stop: f64 },

    /// Resolution must be finite and > 0.
    InvalidResolution { value: f64 },

    /// Number of grid points must be at least 1.
    InvalidNumPoints { value: usize },

    /// Keep percentage must lie in [0, 100].
    InvalidKeepPercentage { value: f64 },

    // ---- Generator configuration ----
    /// A scalar generator parameter is out of its admissible range.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// An initial-condition or coefficient array has the wrong length.
    LengthMismatch { name: &'static str, expected: usize, actual: usize },

    /// Kernel name not present in the Gaussian Process catalog.
    UnknownKernel { name: String },

    /// Harmonic function name not recognized.
    UnknownHarmonic { name: String },

    /// Delay-differential history anchors are malformed.
    InvalidHistory { index: usize, reason: &'static str },

    // ---- Unsupported operations ----
    /// The generator does not implement the requested sampling mode.
    NotSupported { generator: &'static str, operation: &'static str },

    // ---- Numerical failures ----
    /// Covariance matrix has an eigenvalue below the PSD tolerance.
    NotPositiveSemiDefinite { min_eigenvalue: f64 },

    /// A covariance entry evaluated to NaN/±inf.
    NonFiniteCovariance { row: usize, col: usize, value: f64 },

    /// A recurrence produced a NaN/±inf sample.
    NonFiniteSample { generator: &'static str, index: usize, value: f64 },

    /// The delay-differential integrator left the finite range.
    IntegratorDiverged { time: f64, value: f64 },
}

impl SynthError {
    /// Classify this error into one of the three [`ErrorKind`] families.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SynthError::MissingGridSpec
            | SynthError::InvalidTimeRange { .. }
            | SynthError::InvalidResolution { .. }
            | SynthError::InvalidNumPoints { .. }
            | SynthError::InvalidKeepPercentage { .. }
            | SynthError::InvalidParameter { .. }
            | SynthError::LengthMismatch { .. }
            | SynthError::UnknownKernel { .. }
            | SynthError::UnknownHarmonic { .. }
            | SynthError::InvalidHistory { .. } => ErrorKind::Configuration,
            SynthError::NotSupported { .. } => ErrorKind::NotSupported,
            SynthError::NotPositiveSemiDefinite { .. }
            | SynthError::NonFiniteCovariance { .. }
            | SynthError::NonFiniteSample { .. }
            | SynthError::IntegratorDiverged { .. } => ErrorKind::Numerical,
        }
    }
}

impl std::error::Error for SynthError {}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Time grid configuration ----
            SynthError::MissingGridSpec => {
                write!(f, "One of num_points or resolution must be provided.")
            }
            SynthError::InvalidTimeRange { start, stop } => {
                write!(f, "Time range must be finite with start < stop; got [{start}, {stop}].")
            }
            SynthError::InvalidResolution { value } => {
                write!(f, "Resolution must be finite and > 0; got: {value}")
            }
            SynthError::InvalidNumPoints { value } => {
                write!(f, "num_points must be at least 1; got: {value}")
            }
            SynthError::InvalidKeepPercentage { value } => {
                write!(f, "keep_percentage must lie in [0, 100]; got: {value}")
            }
            // ---- Generator configuration ----
            SynthError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}. {reason}")
            }
            SynthError::LengthMismatch { name, expected, actual } => {
                write!(f, "{name} length mismatch: expected {expected}, got {actual}")
            }
            SynthError::UnknownKernel { name } => {
                write!(
                    f,
                    "Unknown kernel {name:?} (expected 'Constant', 'Exponential', 'SE', 'RQ', \
                     'Linear', 'Matern', or 'Periodic')"
                )
            }
            SynthError::UnknownHarmonic { name } => {
                write!(f, "Unknown harmonic function {name:?} (expected 'sin', 'cos', or 'tan')")
            }
            SynthError::InvalidHistory { index, reason } => {
                write!(f, "Invalid history anchor at index {index}: {reason}")
            }
            // ---- Unsupported operations ----
            SynthError::NotSupported { generator, operation } => {
                write!(f, "{generator} does not support {operation} sampling.")
            }
            // ---- Numerical failures ----
            SynthError::NotPositiveSemiDefinite { min_eigenvalue } => {
                write!(
                    f,
                    "Covariance matrix is not positive semi-definite; smallest eigenvalue: \
                     {min_eigenvalue}"
                )
            }
            SynthError::NonFiniteCovariance { row, col, value } => {
                write!(f, "Covariance entry ({row}, {col}) is not finite: {value}")
            }
            SynthError::NonFiniteSample { generator, index, value } => {
                write!(f, "{generator} produced a non-finite sample at index {index}: {value}")
            }
            SynthError::IntegratorDiverged { time, value } => {
                write!(f, "Integrator diverged at t = {time}: state = {value}")
            }
        }
    }
}

/// Convert a [`SynthError`] into the matching Python exception.
///
/// Configuration problems surface as `ValueError`, unsupported operations as
/// `NotImplementedError`, and numerical failures as `ArithmeticError`.
#[cfg(feature = "python-bindings")]
impl std::convert::From<SynthError> for PyErr {
    fn from(err: SynthError) -> PyErr {
        match err.kind() {
            ErrorKind::Configuration => PyValueError::new_err(err.to_string()),
            ErrorKind::NotSupported => PyNotImplementedError::new_err(err.to_string()),
            ErrorKind::Numerical => PyArithmeticError::new_err(err.to_string()),
        }
    }
}
