use std::{
    any::Any,
    collections::{HashMap, VecDeque},
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard, RwLock},
};

use tracing::{error, info, warn};

use super::{CommandError, ErrorCode, ErrorKind, ErrorRecord};
use crate::config::{DEFAULT_ERROR_LOG_CAPACITY, ErrorLogConfig};

/// Side-effecting action run for every handled error of one code.
pub type ErrorAction = Arc<dyn Fn(&CommandError) + Send + Sync>;

/// Dispatch table from error code to action, plus a bounded error log.
///
/// Every code starts with a default action that logs through `tracing`.
/// Registering an action for a code replaces whatever was there. The log
/// keeps the most recent errors first and evicts the oldest past capacity.
pub struct ErrorHandler {
    actions: RwLock<HashMap<ErrorCode, ErrorAction>>,
    log: Mutex<VecDeque<ErrorRecord>>,
    capacity: usize,
}

impl ErrorHandler {
    /// Creates a handler with the default log capacity of 100.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ERROR_LOG_CAPACITY)
    }

    /// Creates a handler whose log keeps at most `capacity` errors (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let actions = ErrorCode::ALL
            .into_iter()
            .map(|code| (code, default_action(code)))
            .collect();

        Self {
            actions: RwLock::new(actions),
            log: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Creates a handler sized from configuration.
    pub fn from_config(config: &ErrorLogConfig) -> Self {
        Self::with_capacity(config.effective_capacity())
    }

    /// Installs `action` for `code`, replacing the previous one.
    pub fn register_handler<F>(&self, code: ErrorCode, action: F)
    where
        F: Fn(&CommandError) + Send + Sync + 'static,
    {
        let mut actions = match self.actions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        actions.insert(code, Arc::new(action));
    }

    /// Logs `error` and runs the action registered for its code.
    ///
    /// Never fails and never panics: a panicking action is reported through
    /// `tracing` and otherwise ignored. Returns the record that was logged.
    pub fn handle_error(&self, error: &CommandError) -> ErrorRecord {
        let record = ErrorRecord::from_error(error);

        {
            let mut log = self.lock_log();
            log.push_front(record.clone());
            log.truncate(self.capacity);
        }

        let code = error.code();
        let action = {
            let actions = match self.actions.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            actions.get(&code).map(Arc::clone)
        }
        .unwrap_or_else(|| default_action(code));

        // Runs without the table lock held, so actions may register handlers.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| action(error)));

        if let Err(payload) = outcome {
            error!(
                code = %code,
                panic = %panic_message(payload.as_ref()),
                "error action panicked"
            );
        }

        record
    }

    /// Normalized, timestamped view of `error`.
    pub fn get_error_details(error: &CommandError) -> ErrorRecord {
        ErrorRecord::from_error(error)
    }

    /// Three-line human rendering of `error`.
    pub fn format_error(error: &CommandError) -> String {
        ErrorRecord::from_error(error).format()
    }

    /// Copy of the log, most recent first.
    pub fn get_error_log(&self) -> Vec<ErrorRecord> {
        self.lock_log().iter().cloned().collect()
    }

    /// Empties the log.
    pub fn clear_error_log(&self) {
        self.lock_log().clear();
    }

    /// Maximum number of retained errors.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock_log(&self) -> MutexGuard<'_, VecDeque<ErrorRecord>> {
        match self.log.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn default_action(code: ErrorCode) -> ErrorAction {
    match code {
        ErrorCode::CommandNotFound => Arc::new(|err: &CommandError| {
            warn!(code = %err.code(), "{err}");
        }),
        ErrorCode::InvalidArguments => Arc::new(|err: &CommandError| {
            if let ErrorKind::InvalidArguments { validation } = err.kind() {
                for failure in validation {
                    warn!(field = %failure.field, rule = %failure.rule, "{}", failure.message);
                }
            }
        }),
        ErrorCode::PermissionDenied | ErrorCode::RateLimitExceeded | ErrorCode::Timeout => {
            Arc::new(|err: &CommandError| {
                warn!(code = %err.code(), details = %err.details(), "{err}");
            })
        }
        ErrorCode::Cancelled => Arc::new(|err: &CommandError| {
            info!(code = %err.code(), "{err}");
        }),
        ErrorCode::ExecutionFailed | ErrorCode::InvalidState | ErrorCode::SystemError => {
            Arc::new(|err: &CommandError| {
                error!(code = %err.code(), details = %err.details(), "{err}");
            })
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
