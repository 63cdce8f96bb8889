use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable error codes.
///
/// The string forms are part of the external contract and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No command is registered at the requested path.
    CommandNotFound,
    /// Arguments failed schema validation.
    InvalidArguments,
    /// The caller lacks a permission the command requires.
    PermissionDenied,
    /// The command was invoked too often.
    RateLimitExceeded,
    /// The command handler failed.
    ExecutionFailed,
    /// The command was cancelled before completing.
    Cancelled,
    /// The command did not complete in time.
    Timeout,
    /// An operation was attempted in the wrong state.
    InvalidState,
    /// Any other failure.
    SystemError,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::CommandNotFound,
        ErrorCode::InvalidArguments,
        ErrorCode::PermissionDenied,
        ErrorCode::RateLimitExceeded,
        ErrorCode::ExecutionFailed,
        ErrorCode::Cancelled,
        ErrorCode::Timeout,
        ErrorCode::InvalidState,
        ErrorCode::SystemError,
    ];

    /// The stable string form of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::CommandNotFound => "COMMAND_NOT_FOUND",
            ErrorCode::InvalidArguments => "INVALID_ARGUMENTS",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::ExecutionFailed => "EXECUTION_FAILED",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::SystemError => "SYSTEM_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
