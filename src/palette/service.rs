use std::sync::{Mutex, MutexGuard};

use tracing::{debug, instrument};

use super::{HistoryEntry, Outcome, ParsedInput, parse_input};
use crate::{
    config::{PaletteConfig, PaletteSettings},
    errors::{CommandError, ErrorHandler},
    registry::{CommandPath, CommandRegistry, CommandResponse, Invocation},
    validation::Validator,
};

/// Registry, validator, and error handler wired into one pipeline.
///
/// Every attempted command ends in exactly one history entry. Failures are
/// passed through the error handler and then returned to the caller
/// unchanged.
pub struct CommandPalette {
    registry: CommandRegistry,
    validator: Validator,
    errors: ErrorHandler,
    history: Mutex<Vec<HistoryEntry>>,
    settings: PaletteSettings,
}

impl CommandPalette {
    /// Creates a palette with default settings and no commands.
    pub fn new() -> Self {
        Self::from_config(&PaletteConfig::default())
    }

    /// Creates a palette sized and configured from `config`.
    pub fn from_config(config: &PaletteConfig) -> Self {
        Self {
            registry: CommandRegistry::new(),
            validator: Validator::new(),
            errors: ErrorHandler::from_config(&config.error_log),
            history: Mutex::new(Vec::new()),
            settings: config.palette.clone(),
        }
    }

    /// The command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Mutable access for registering commands.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// The validator, for registering custom type checks.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The error handler, for registering actions and reading the log.
    pub fn error_handler(&self) -> &ErrorHandler {
        &self.errors
    }

    /// Moves leading arguments that name a subcommand into the path.
    ///
    /// Does nothing when subcommand resolution is turned off.
    pub fn resolve(&self, input: ParsedInput) -> ParsedInput {
        if !self.settings.resolve_subcommands {
            return input;
        }

        let ParsedInput { mut path, args } = input;
        let mut consumed = 0;
        for arg in &args {
            let is_child = self
                .registry
                .get_subcommands(path.segments())
                .iter()
                .any(|entry| entry.name() == arg);
            if !is_child {
                break;
            }
            path = path.child(arg.as_str());
            consumed += 1;
        }

        ParsedInput {
            path,
            args: args.into_iter().skip(consumed).collect(),
        }
    }

    /// Parses, resolves, and runs one input line.
    ///
    /// Blank input is not a command: it returns an empty response and
    /// leaves no history entry.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn run(&self, line: &str) -> Result<CommandResponse, CommandError> {
        let Some(input) = parse_input(line) else {
            return Ok(CommandResponse::Empty);
        };
        let ParsedInput { path, args } = self.resolve(input);
        self.dispatch(path, args).await
    }

    /// Runs the command at `path` and records the attempt in the history.
    ///
    /// A command without a handler responds with a table of its
    /// subcommands.
    ///
    /// # Errors
    ///
    /// `COMMAND_NOT_FOUND` when nothing is registered at `path`,
    /// `INVALID_ARGUMENTS` when `args` fail the command's schema, and
    /// `EXECUTION_FAILED` when the handler fails.
    #[instrument(skip_all, fields(command = %path))]
    pub async fn dispatch(
        &self,
        path: CommandPath,
        args: Vec<String>,
    ) -> Result<CommandResponse, CommandError> {
        let command_id = path.to_string();
        let outcome = self.execute(path, args.clone()).await;

        let recorded = match &outcome {
            Ok(response) => Outcome::Result(response.clone()),
            Err(error) => Outcome::Error(self.errors.handle_error(error)),
        };
        self.record(HistoryEntry::new(command_id, args, recorded));

        outcome
    }

    /// Copy of the history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock_history().clone()
    }

    /// Empties the history.
    pub fn clear_history(&self) {
        self.lock_history().clear();
    }

    async fn execute(
        &self,
        path: CommandPath,
        args: Vec<String>,
    ) -> Result<CommandResponse, CommandError> {
        let Some(entry) = self.registry.get_command_by_path(path.segments()) else {
            return Err(CommandError::not_found(path.to_string()));
        };

        let parsed = match &entry.schema {
            Some(schema) => {
                let result = self.validator.validate(&args, schema).await;
                Some(result.into_result().map_err(CommandError::invalid_arguments)?)
            }
            None => None,
        };

        if !entry.is_executable() {
            debug!("listing subcommands of grouping command");
            return Ok(self.subcommand_table(&path));
        }

        let invocation = Invocation { path, args, parsed };
        let response = self.registry.execute(invocation).await?;
        Ok(response.unwrap_or(CommandResponse::Empty))
    }

    fn subcommand_table(&self, path: &CommandPath) -> CommandResponse {
        let rows = self
            .registry
            .get_subcommands(path.segments())
            .into_iter()
            .map(|entry| vec![entry.path.to_string(), entry.description.clone()])
            .collect();

        CommandResponse::Table {
            headers: vec!["command".to_string(), "description".to_string()],
            rows,
        }
    }

    fn record(&self, entry: HistoryEntry) {
        let mut history = self.lock_history();
        history.push(entry);
        if let Some(limit) = self.settings.history_limit {
            let excess = history.len().saturating_sub(limit);
            history.drain(..excess);
        }
    }

    fn lock_history(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new()
    }
}
