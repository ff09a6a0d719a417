#![forbid(unsafe_code)]

//! Structured logging plumbing.
//!
//! With the `tracing` feature the tracing macros are re-exported so library
//! crates can log through `shoots_core::debug!` without naming `tracing`
//! directly. With `tracing-subscriber`, [`init_subscriber`] installs the
//! process-wide subscriber a host binary wants: an [`EnvFilter`] plus either
//! the human-readable `fmt` layer or the JSON layer, writing to stderr.
//!
//! [`EnvFilter`]: tracing_subscriber::EnvFilter

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

/// Environment variable consulted before any configured filter.
pub const LOG_ENV_VAR: &str = "SHOOTS_LOG";

/// Filter used when neither the environment nor the config names one.
pub const DEFAULT_LOG_FILTER: &str = "shoots=info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "human" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Logging setup failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnknownFormat(String),
    InvalidFilter { filter: String, reason: String },
    AlreadyInstalled,
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormat(format) => {
                write!(f, "unknown log format {format:?} (expected pretty or json)")
            }
            Self::InvalidFilter { filter, reason } => {
                write!(f, "invalid log filter {filter:?}: {reason}")
            }
            Self::AlreadyInstalled => write!(f, "a global tracing subscriber is already installed"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Install the global subscriber.
///
/// `SHOOTS_LOG` wins over `fallback_filter`; `fallback_filter` wins over
/// [`DEFAULT_LOG_FILTER`].
#[cfg(feature = "tracing-subscriber")]
pub fn init_subscriber(
    fallback_filter: Option<&str>,
    format: LogFormat,
) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(from_env) if !from_env.trim().is_empty() => from_env,
        _ => fallback_filter.unwrap_or(DEFAULT_LOG_FILTER).to_string(),
    };
    let env_filter = EnvFilter::try_new(&filter).map_err(|err| LoggingError::InvalidFilter {
        filter: filter.clone(),
        reason: err.to_string(),
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true),
            )
            .try_init(),
    };
    installed.map_err(|_| LoggingError::AlreadyInstalled)?;

    tracing::debug!(%filter, %format, "tracing initialized");
    Ok(())
}
