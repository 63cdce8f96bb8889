use serde_json::json;
use thiserror::Error;

use super::CommandPath;
use crate::errors::CommandError;

/// Errors raised while building the command tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A command is already registered at this path.
    ///
    /// The registry is left as it was before the failing call, apart from
    /// the documented shallow rollback of nested registrations.
    #[error("Command already registered: {path}")]
    DuplicateCommand {
        /// Fully-qualified path that was taken.
        path: CommandPath,
    },

    /// The command name cannot be used as a path segment.
    #[error("Invalid command name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl From<RegistryError> for CommandError {
    fn from(error: RegistryError) -> Self {
        let converted = match &error {
            RegistryError::DuplicateCommand { .. } => {
                CommandError::invalid_state("unregistered", "registered")
            }
            RegistryError::InvalidName { name, .. } => {
                CommandError::system(error.to_string(), json!({ "name": name }))
            }
        };
        converted.with_message(error.to_string()).with_source(error)
    }
}
