use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{CommandError, ErrorCode};

/// Normalized, timestamped, display-ready snapshot of a [`CommandError`].
///
/// This is what the error log retains and what the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Machine-readable code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Code-specific context.
    pub details: Value,
    /// Messages of the error's source chain, outermost first.
    pub causes: Vec<String>,
    /// When the record was taken.
    pub timestamp: DateTime<Utc>,
}

impl ErrorRecord {
    /// Snapshots `error` at the current time.
    pub fn from_error(error: &CommandError) -> Self {
        Self::at(error, Utc::now())
    }

    /// Snapshots `error` with an explicit timestamp.
    pub fn at(error: &CommandError, timestamp: DateTime<Utc>) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_string(),
            details: error.details(),
            causes: error.causes(),
            timestamp,
        }
    }

    /// The `commandId` detail, for kinds that carry one.
    pub fn command_id(&self) -> Option<&str> {
        self.details.get("commandId").and_then(Value::as_str)
    }

    /// Renders the record as three lines: header, details, timestamp.
    pub fn format(&self) -> String {
        let details = serde_json::to_string_pretty(&self.details)
            .unwrap_or_else(|_| self.details.to_string());
        format!(
            "[{}] {}\nDetails: {}\nTimestamp: {}",
            self.code,
            self.message,
            details,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}
