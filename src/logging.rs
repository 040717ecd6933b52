//! Logging initialization for the command-line host.
//!
//! Library code only emits `tracing` events; installing a subscriber is the binary's call.
//! Output goes to stderr so that stdout stays clean for text or JSON results.

use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How chatty the command line was asked to be.
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Use `RUST_LOG`, falling back to the configured level.
    #[default]
    Normal,
    /// Debug events from every module.
    Verbose,
}

/// Filter for `verbosity`, with `default_level` used when nothing else applies.
#[must_use]
pub fn filter(verbosity: Verbosity, default_level: &str) -> EnvFilter {
    match verbosity {
        Verbosity::Quiet => EnvFilter::new("error"),
        Verbosity::Verbose => EnvFilter::new("debug"),
        Verbosity::Normal => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
        }
    }
}

/// Install the global fmt subscriber writing to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbosity: Verbosity, default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity, default_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
