//! Logging setup for hosts embedding keel
//!
//! Reports surfaced through the default sink land in `tracing`. Hosts that do
//! not install their own subscriber can call [`init_logging`].

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Colored output
    pub ansi: bool,
    /// Include the event target (module path)
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default_filter: "info".to_string(),
            ansi: true,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Plain output at debug level, for test runs and log files
    pub fn verbose() -> Self {
        LoggingConfig {
            default_filter: "debug".to_string(),
            ansi: false,
            with_target: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install a global fmt subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
