//! Structured logging for the `strata` binary.
//!
//! Diagnostics go to `stderr` through a global `tracing` subscriber so the
//! cluster listing on `stdout` stays machine-readable. `log` records from
//! dependencies are bridged into the same subscriber.

use std::{env, fmt, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "STRATA_LOG_FORMAT";

const DEFAULT_DIRECTIVE: &str = "info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Rendering applied to log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Human,
    /// One JSON object per line, including the active span list.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoggingError {
    /// An environment variable held invalid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `STRATA_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
}

/// Reads the requested [`LogFormat`] from `STRATA_LOG_FORMAT`.
///
/// # Errors
/// Returns [`LoggingError`] when the variable is not valid UTF-8 or names an
/// unknown format.
pub fn format_from_env() -> Result<LogFormat, LoggingError> {
    format_from(env::var(LOG_FORMAT_ENV))
}

fn format_from(lookup: Result<String, env::VarError>) -> Result<LogFormat, LoggingError> {
    match lookup {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

/// Installs global structured logging once per process.
///
/// The level filter comes from `RUST_LOG` and defaults to `info`. When another
/// subscriber already owns the global slot it is left in place and the format
/// that would have been used is still reported.
///
/// # Errors
/// Returns [`LoggingError`] when `STRATA_LOG_FORMAT` cannot be honoured.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }
    let format = format_from_env()?;
    install(format);
    Ok(*INSTALLED.get_or_init(|| format))
}

fn install(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let layer = match format {
        LogFormat::Human => layer.boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // A logger installed elsewhere keeps the `log` slot.
    if LogTracer::init().is_err() {
        tracing::debug!("log bridge already installed");
    }
    if let Err(error) = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
    {
        tracing::debug!(%error, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("human", LogFormat::Human)]
    #[case("TEXT", LogFormat::Human)]
    #[case(" json ", LogFormat::Json)]
    fn parses_supported_formats(#[case] raw: &str, #[case] expected: LogFormat) {
        let format: LogFormat = raw.parse().expect("format must parse");
        assert_eq!(format, expected);
    }

    #[rstest]
    fn rejects_unknown_formats() {
        let err = "xml".parse::<LogFormat>().expect_err("xml is not supported");
        assert!(matches!(err, LoggingError::UnsupportedFormat { provided } if provided == "xml"));
    }

    #[rstest]
    fn missing_variable_selects_human_output() {
        let format = format_from(Err(env::VarError::NotPresent)).expect("default must apply");
        assert_eq!(format, LogFormat::Human);
        assert_eq!(format.to_string(), "human");
    }

    #[rstest]
    fn non_unicode_variable_is_reported() {
        let raw = std::ffi::OsString::from("json");
        let err = format_from(Err(env::VarError::NotUnicode(raw)))
            .expect_err("invalid unicode must fail");
        assert!(matches!(
            err,
            LoggingError::InvalidUnicode { name: LOG_FORMAT_ENV, .. }
        ));
    }

    #[rstest]
    fn init_logging_is_idempotent() {
        let first = init_logging().expect("logging must initialise");
        let second = init_logging().expect("subsequent calls must be no-ops");
        assert_eq!(first, second);
    }
}
