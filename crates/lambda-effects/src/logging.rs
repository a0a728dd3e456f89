//! Layer 3: Logging Bootstrap - Production Only
//!
//! Installs the process-wide `tracing` subscriber. The level comes from
//! [`DefaultEnvironment::LogLevel`] through an environment capability, so the
//! configuration path is testable with an injected resolver.

use lambda_core::{DefaultEnvironment, EnvironmentValueProvider};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logging bootstrap errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggingError {
    /// The configured level is not recognized
    #[error("Unrecognized log level `{value}`")]
    InvalidLevel {
        /// Raw configured value
        value: String,
    },

    /// A global subscriber is already installed
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Configuration for the global subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Maximum level emitted
    pub level: Level,
    /// Whether to emit ANSI colors
    pub ansi: bool,
    /// Whether to include the event target
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            ansi: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Resolve the configuration from the environment
    ///
    /// A missing `LOG_LEVEL` keeps the default level.
    pub fn from_environment<P>(provider: &P) -> Result<Self, LoggingError>
    where
        P: EnvironmentValueProvider<Variable = DefaultEnvironment> + ?Sized,
    {
        match provider.value(&DefaultEnvironment::LogLevel) {
            Ok(value) => Ok(Self {
                level: parse_level(&value)?,
                ..Self::default()
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .parse_lossy("")
    }
}

/// Parse a log level name
///
/// Accepts the `tracing` names in any case plus the syslog-style aliases
/// `notice`, `warning` and `critical`.
pub fn parse_level(value: &str) -> Result<Level, LoggingError> {
    let normalized = value.trim().to_ascii_lowercase();
    let alias = match normalized.as_str() {
        "notice" => Some(Level::INFO),
        "warning" => Some(Level::WARN),
        "critical" => Some(Level::ERROR),
        _ => None,
    };
    match alias {
        Some(level) => Ok(level),
        None => Level::from_str(&normalized).map_err(|_| LoggingError::InvalidLevel {
            value: value.to_string(),
        }),
    }
}

/// Install the global fmt subscriber
///
/// Timestamps are omitted; the platform stamps every log line.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .without_time()
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
