use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{errors::ErrorRecord, registry::CommandResponse};

/// How an attempted command ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// The command produced a response.
    Result(CommandResponse),
    /// The command failed.
    Error(ErrorRecord),
}

/// One attempted command, as shown in the palette's history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Dotted path that was attempted.
    pub command_id: String,
    /// Argument tokens as entered.
    pub args: Vec<String>,
    /// When the attempt finished.
    pub timestamp: DateTime<Utc>,
    /// Either the response or the error, never both.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl HistoryEntry {
    pub(crate) fn new(command_id: String, args: Vec<String>, outcome: Outcome) -> Self {
        Self {
            command_id,
            args,
            timestamp: Utc::now(),
            outcome,
        }
    }

    /// The response, if the command succeeded.
    pub fn result(&self) -> Option<&CommandResponse> {
        match &self.outcome {
            Outcome::Result(response) => Some(response),
            Outcome::Error(_) => None,
        }
    }

    /// The error, if the command failed.
    pub fn error(&self) -> Option<&ErrorRecord> {
        match &self.outcome {
            Outcome::Error(record) => Some(record),
            Outcome::Result(_) => None,
        }
    }
}
