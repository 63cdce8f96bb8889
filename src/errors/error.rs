use std::{error::Error as StdError, time::Duration};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::ErrorCode;
use crate::validation::ValidationError;

/// Boxed error type accepted as the underlying cause of a command failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Context attached to a [`CommandError`], one variant per [`ErrorCode`].
///
/// Serializes to the detail object shown to users, with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorKind {
    /// `COMMAND_NOT_FOUND`
    #[serde(rename_all = "camelCase")]
    NotFound {
        /// Path that failed to resolve.
        command_id: String,
    },

    /// `INVALID_ARGUMENTS`
    InvalidArguments {
        /// Every validation failure, in report order.
        validation: Vec<ValidationError>,
    },

    /// `PERMISSION_DENIED`
    #[serde(rename_all = "camelCase")]
    PermissionDenied {
        /// Command that was refused.
        command_id: String,
        /// Permissions the caller would need.
        required_permissions: Vec<String>,
    },

    /// `RATE_LIMIT_EXCEEDED`
    #[serde(rename_all = "camelCase")]
    RateLimitExceeded {
        /// Command that was throttled.
        command_id: String,
        /// Invocations allowed per window.
        limit: u32,
        /// Window length in milliseconds.
        #[serde(rename = "window")]
        window_ms: u64,
    },

    /// `EXECUTION_FAILED`
    #[serde(rename_all = "camelCase")]
    ExecutionFailed {
        /// Command whose handler failed.
        command_id: String,
        /// Message of the underlying failure.
        cause: String,
    },

    /// `CANCELLED`
    #[serde(rename_all = "camelCase")]
    Cancelled {
        /// Command that was cancelled.
        command_id: String,
    },

    /// `TIMEOUT`
    #[serde(rename_all = "camelCase")]
    Timeout {
        /// Command that timed out.
        command_id: String,
        /// Deadline in milliseconds.
        #[serde(rename = "timeout")]
        timeout_ms: u64,
    },

    /// `INVALID_STATE`
    #[serde(rename_all = "camelCase")]
    InvalidState {
        /// State the operation required.
        expected_state: String,
        /// State that was found.
        actual_state: String,
    },

    /// `SYSTEM_ERROR`, with free-form details.
    System(Value),
}

impl ErrorKind {
    /// The code this context belongs to.
    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::NotFound { .. } => ErrorCode::CommandNotFound,
            ErrorKind::InvalidArguments { .. } => ErrorCode::InvalidArguments,
            ErrorKind::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            ErrorKind::RateLimitExceeded { .. } => ErrorCode::RateLimitExceeded,
            ErrorKind::ExecutionFailed { .. } => ErrorCode::ExecutionFailed,
            ErrorKind::Cancelled { .. } => ErrorCode::Cancelled,
            ErrorKind::Timeout { .. } => ErrorCode::Timeout,
            ErrorKind::InvalidState { .. } => ErrorCode::InvalidState,
            ErrorKind::System(_) => ErrorCode::SystemError,
        }
    }
}

/// A coded failure of the command pipeline.
///
/// Constructed at the failure site, passed once through
/// [`ErrorHandler::handle_error`](super::ErrorHandler::handle_error), then
/// returned to the caller.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CommandError {
    message: String,
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl CommandError {
    /// Creates an error from a message and its typed context.
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            source: None,
        }
    }

    /// No command is registered at `command_id`.
    pub fn not_found(command_id: impl Into<String>) -> Self {
        let command_id = command_id.into();
        Self::new(
            format!("Command not found: {command_id}"),
            ErrorKind::NotFound { command_id },
        )
    }

    /// Arguments were rejected by the command's schema.
    pub fn invalid_arguments(validation: Vec<ValidationError>) -> Self {
        let summary = validation
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(
            format!("Invalid arguments: {summary}"),
            ErrorKind::InvalidArguments { validation },
        )
    }

    /// The caller lacks `required_permissions` for `command_id`.
    pub fn permission_denied(
        command_id: impl Into<String>,
        required_permissions: Vec<String>,
    ) -> Self {
        let command_id = command_id.into();
        Self::new(
            format!("Permission denied for command: {command_id}"),
            ErrorKind::PermissionDenied {
                command_id,
                required_permissions,
            },
        )
    }

    /// `command_id` exceeded `limit` invocations per `window`.
    pub fn rate_limit_exceeded(command_id: impl Into<String>, limit: u32, window: Duration) -> Self {
        let command_id = command_id.into();
        Self::new(
            format!("Rate limit exceeded for command: {command_id}"),
            ErrorKind::RateLimitExceeded {
                command_id,
                limit,
                window_ms: millis(window),
            },
        )
    }

    /// The handler of `command_id` failed with `cause`, which is kept as
    /// the error source.
    pub fn execution_failed(command_id: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        let command_id = command_id.into();
        let cause = cause.into();
        Self {
            message: format!("Command execution failed: {cause}"),
            kind: ErrorKind::ExecutionFailed {
                command_id,
                cause: cause.to_string(),
            },
            source: Some(cause),
        }
    }

    /// `command_id` was cancelled.
    pub fn cancelled(command_id: impl Into<String>) -> Self {
        let command_id = command_id.into();
        Self::new(
            format!("Command cancelled: {command_id}"),
            ErrorKind::Cancelled { command_id },
        )
    }

    /// `command_id` did not finish within `timeout`.
    pub fn timeout(command_id: impl Into<String>, timeout: Duration) -> Self {
        let command_id = command_id.into();
        let timeout_ms = millis(timeout);
        Self::new(
            format!("Command timed out after {timeout_ms}ms: {command_id}"),
            ErrorKind::Timeout {
                command_id,
                timeout_ms,
            },
        )
    }

    /// An operation expected `expected_state` but found `actual_state`.
    pub fn invalid_state(
        expected_state: impl Into<String>,
        actual_state: impl Into<String>,
    ) -> Self {
        let expected_state = expected_state.into();
        let actual_state = actual_state.into();
        Self::new(
            format!("Invalid state: expected {expected_state}, found {actual_state}"),
            ErrorKind::InvalidState {
                expected_state,
                actual_state,
            },
        )
    }

    /// Any other failure, with free-form details.
    pub fn system(message: impl Into<String>, details: Value) -> Self {
        Self::new(message, ErrorKind::System(details))
    }

    /// Attaches an underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Replaces the human-readable message, keeping code and context.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The machine-readable code.
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The typed context.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The context as a JSON object.
    pub fn details(&self) -> Value {
        serde_json::to_value(&self.kind).unwrap_or(Value::Null)
    }

    /// Messages of the source chain, outermost first.
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = StdError::source(self);
        while let Some(error) = current {
            causes.push(error.to_string());
            current = error.source();
        }
        causes
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
