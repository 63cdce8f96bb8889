use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of entries retained by the error log.
pub const DEFAULT_ERROR_LOG_CAPACITY: usize = 100;

/// Settings for the bounded error log kept by the error handler.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ErrorLogConfig {
    /// Maximum number of errors retained, most recent first.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl ErrorLogConfig {
    /// Capacity actually applied to the log. A log always keeps at least
    /// the most recent error.
    pub fn effective_capacity(&self) -> usize {
        self.capacity.max(1)
    }
}

impl Default for ErrorLogConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_ERROR_LOG_CAPACITY
}
