use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::Level;

/// Logging level for the palette.
///
/// Controls the verbosity of log output, from failures only
/// to detailed trace information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only show errors, such as failed command executions.
    Error,

    /// Show warnings and errors (unknown commands, rejected arguments).
    Warn,

    /// Show informational messages, warnings, and errors (default level).
    #[default]
    Info,

    /// Show registration and resolution details.
    Debug,

    /// Show everything, including every validation step.
    Trace,
}

impl LogLevel {
    /// The equivalent `tracing` level.
    pub fn as_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
