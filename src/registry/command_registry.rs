use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, info, instrument, warn};

use super::{
    Command, CommandEntry, CommandPath, CommandResponse, Invocation, RegistryError,
    tree::CommandTree,
};
use crate::errors::{CommandError, panic_message};

/// Tree of registered commands.
///
/// Registration is by value: the registry keeps its own entries and never
/// hands out mutable access to them. Commands are never unregistered.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    tree: CommandTree,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command` at the root, then its subcommands beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCommand`] if the path or any
    /// descendant path is already taken, and [`RegistryError::InvalidName`]
    /// for an unusable name. On a descendant failure the entry for
    /// `command` itself is removed again; descendants that did register
    /// beneath it are left in place.
    pub fn register_command(&mut self, command: Command) -> Result<(), RegistryError> {
        self.register_subcommand(command, &CommandPath::root())
    }

    /// Registers `command` beneath `parent`. Same rollback as
    /// [`register_command`](Self::register_command).
    ///
    /// # Errors
    ///
    /// See [`register_command`](Self::register_command).
    #[instrument(skip_all, fields(command = %command.name, parent = %parent))]
    pub fn register_subcommand(
        &mut self,
        command: Command,
        parent: &CommandPath,
    ) -> Result<(), RegistryError> {
        validate_name(&command.name)?;

        let path = parent.child(command.name.as_str());
        self.tree.insert(CommandEntry::from_command(&command, path.clone()))?;
        debug!(path = %path, "registered command");

        for subcommand in command.subcommands {
            if let Err(e) = self.register_subcommand(subcommand, &path) {
                warn!(path = %path, error = %e, "rolling back command");
                self.tree.remove_entry(&path);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Registers root commands in order.
    ///
    /// # Errors
    ///
    /// Re-raises the first failure after removing every root command this
    /// call registered. Nothing below the roots is rolled back.
    #[instrument(skip_all, fields(count = commands.len()))]
    pub fn register_commands(&mut self, commands: Vec<Command>) -> Result<(), RegistryError> {
        let mut registered: Vec<CommandPath> = Vec::with_capacity(commands.len());

        for command in commands {
            let path = CommandPath::root().child(command.name.as_str());
            match self.register_command(command) {
                Ok(()) => registered.push(path),
                Err(e) => {
                    warn!(
                        error = %e,
                        rolled_back = registered.len(),
                        "batch registration failed"
                    );
                    for path in &registered {
                        self.tree.remove_entry(path);
                    }
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// The command at `path`, or `None`. The empty path is never a command.
    pub fn get_command_by_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandEntry> {
        self.tree.find(path)
    }

    /// Registered children of the command at `path`.
    pub fn get_subcommands<S: AsRef<str>>(&self, path: &[S]) -> Vec<&CommandEntry> {
        self.tree.children(path)
    }

    /// Every registered depth-one command.
    pub fn get_root_commands(&self) -> Vec<&CommandEntry> {
        self.tree.roots()
    }

    /// Runs the command at `path` with raw `args`.
    ///
    /// Returns `Ok(None)` if nothing is registered at `path` or the command
    /// has no handler.
    ///
    /// # Errors
    ///
    /// A failing or panicking handler is reported as `EXECUTION_FAILED`
    /// with the command path and the original cause.
    pub async fn execute_command<S: AsRef<str>>(
        &self,
        path: &[S],
        args: Vec<String>,
    ) -> Result<Option<CommandResponse>, CommandError> {
        let path = CommandPath::new(path.iter().map(|segment| -> &str { segment.as_ref() }));
        self.execute(Invocation::raw(path, args)).await
    }

    /// Runs the command addressed by `invocation.path`.
    ///
    /// # Errors
    ///
    /// See [`execute_command`](Self::execute_command).
    #[instrument(skip_all, fields(command = %invocation.path))]
    pub async fn execute(
        &self,
        invocation: Invocation,
    ) -> Result<Option<CommandResponse>, CommandError> {
        let Some(entry) = self.tree.find(invocation.path.segments()) else {
            debug!("no command at path");
            return Ok(None);
        };
        let Some(handler) = entry.handler.clone() else {
            debug!("command has no handler");
            return Ok(None);
        };

        let command_id = entry.path.to_string();
        info!(args = invocation.args.len(), "executing command");

        match AssertUnwindSafe(handler.call(invocation)).catch_unwind().await {
            Ok(Ok(response)) => Ok(Some(response)),
            Ok(Err(cause)) => Err(CommandError::execution_failed(command_id, cause)),
            Err(payload) => {
                let message = format!("handler panicked: {}", panic_message(payload.as_ref()));
                Err(CommandError::execution_failed(command_id, message))
            }
        }
    }

    /// Dotted paths of every command starting with `prefix`, sorted.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .tree
            .entries()
            .into_iter()
            .map(|entry| entry.path.to_string())
            .filter(|path| path.starts_with(prefix))
            .collect();
        matches.sort();
        matches
    }

    /// Dotted paths of every command, depth-first in registration order.
    pub fn list_paths(&self) -> Vec<String> {
        self.tree
            .entries()
            .into_iter()
            .map(|entry| entry.path.to_string())
            .collect()
    }

    /// One aligned `path  description` line per command.
    pub fn help_lines(&self) -> Vec<String> {
        let entries = self.tree.entries();
        let longest = entries
            .iter()
            .map(|entry| entry.path.to_string().chars().count())
            .max()
            .unwrap_or(0);

        entries
            .into_iter()
            .map(|entry| {
                format!(
                    "{:<width$}  {}",
                    entry.path.to_string(),
                    entry.description,
                    width = longest
                )
            })
            .collect()
    }
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(super::path::PATH_SEPARATOR) {
        "name contains the path separator"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else {
        return Ok(());
    };

    Err(RegistryError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
