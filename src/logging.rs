//! logging — slog loggers for sampling diagnostics.
//!
//! The crate never logs unless a caller attaches a logger. Types that emit
//! diagnostics (`TimeSampler`, `TimeSeries`, `MackeyGlass`) hold a
//! [`slog::Logger`] that defaults to [`discard`]; a non-blocking terminal
//! logger is available behind the `obs_slog` feature.
use slog::{Logger, o};

/// Logger that drops every record. Default for all logger-carrying types.
pub fn discard() -> Logger {
    Logger::root(slog::Discard, o!())
}

/// Non-blocking terminal logger (stderr), mirroring the observer used for
/// verbose optimizer runs.
#[cfg(feature = "obs_slog")]
pub fn terminal() -> Logger {
    use slog::Drain;

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => "rust_timesynth"))
}
