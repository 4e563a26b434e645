//! Process logging setup.

use crate::{Error, Result};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Output format for process logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output for terminals.
    #[default]
    Pretty,
    /// Newline-delimited JSON for log shippers.
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively. Unknown names fall back to
    /// pretty.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }

    fn from_env() -> Self {
        std::env::var("DAYZERO_LOG_FORMAT").map_or(Self::Pretty, |value| Self::parse(&value))
    }
}

/// Logging configuration for [`init`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl LoggingConfig {
    /// Builds the configuration from the environment and the debug flags.
    ///
    /// `RUST_LOG` always wins when set. Otherwise third-party crates log at
    /// warn, and this crate logs at info, raised to debug when `verbose` is
    /// requested.
    #[must_use]
    pub fn from_env(verbose: bool) -> Self {
        let crate_level = if verbose { "debug" } else { "info" };
        Self {
            format: LogFormat::from_env(),
            default_filter: format!("warn,{}={crate_level}", env!("CARGO_PKG_NAME")),
        }
    }
}

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global tracing subscriber once for the process.
///
/// Replies own stdout, so all log output goes to stderr.
///
/// # Errors
///
/// Returns [`Error::Config`] if logging was already initialized or the
/// subscriber cannot be installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if LOGGING_INIT.get().is_some() {
        return Err(Error::Config("logging already initialized".to_string()));
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init(),
    }
    .map_err(|e| Error::Config(format!("failed to install log subscriber: {e}")))?;

    let _ = LOGGING_INIT.set(());
    Ok(())
}
