//! Subscriber setup for the binary and the test suites.
//!
//! Everything is written to stderr so `--json` reports on stdout stay
//! machine-readable.

use thiserror::Error;
use tracing::Level;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Failed to bridge log records into tracing: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
}

/// Maps repeated `-v` flags to a level; quiet runs only show warnings.
pub fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` wins over the verbosity flags when it is set and parses.
fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_level(verbosity).as_str()))
}

/// Installs the global subscriber. Call once, early in `main`.
pub fn init(verbosity: u8, json: bool) -> Result<(), LoggingError> {
    LogTracer::builder()
        .with_max_level(tracing_log::log::LevelFilter::Trace)
        .init()?;

    let registry = tracing_subscriber::registry().with(env_filter(verbosity));
    if json {
        let layer = fmt::layer().json().with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(registry.with(layer))?;
    } else {
        let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(registry.with(layer))?;
    }

    Ok(())
}

/// Routes spans and events through the test harness's captured output.
/// Safe to call from every test.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
