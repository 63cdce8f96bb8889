use std::{fmt, future::Future, sync::Arc};

use async_trait::async_trait;

use super::{CommandPath, CommandResponse};
use crate::{
    errors::BoxError,
    validation::{ParsedArgs, ValidationSchema},
};

/// Result type of command handlers.
pub type HandlerResult = Result<CommandResponse, BoxError>;

/// Arguments passed to a command handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Path of the invoked command.
    pub path: CommandPath,
    /// Raw argument tokens.
    pub args: Vec<String>,
    /// Typed values, present when the command declares a schema and the
    /// arguments were validated against it.
    pub parsed: Option<ParsedArgs>,
}

impl Invocation {
    /// Invocation carrying raw tokens only.
    pub fn raw(path: CommandPath, args: Vec<String>) -> Self {
        Self {
            path,
            args,
            parsed: None,
        }
    }
}

/// Asynchronous body of a command.
///
/// Implemented for structs, and for any `Fn(Invocation) -> Future` such as
/// an `async fn` taking an [`Invocation`].
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Any error returned here is wrapped into an `EXECUTION_FAILED`
    /// [`CommandError`](crate::errors::CommandError) by the registry.
    async fn call(&self, invocation: Invocation) -> HandlerResult;
}

#[async_trait]
impl<F, Fut> CommandHandler for F
where
    F: Fn(Invocation) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn call(&self, invocation: Invocation) -> HandlerResult {
        (self)(invocation).await
    }
}

/// Definition of a command and, recursively, its subcommands.
///
/// A command without a handler is a pure grouping node.
#[derive(Clone)]
pub struct Command {
    /// Path segment naming this command.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Body run on execution.
    pub handler: Option<Arc<dyn CommandHandler>>,
    /// Children, registered beneath this command.
    pub subcommands: Vec<Command>,
    /// Expected arguments.
    pub schema: Option<Arc<ValidationSchema>>,
}

impl Command {
    /// Creates a grouping command with no handler.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler: None,
            subcommands: Vec::new(),
            schema: None,
        }
    }

    /// Sets the handler.
    pub fn handler(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Appends a subcommand.
    pub fn subcommand(mut self, command: Command) -> Self {
        self.subcommands.push(command);
        self
    }

    /// Sets the argument schema.
    pub fn schema(mut self, schema: ValidationSchema) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("has_handler", &self.handler.is_some())
            .field("subcommands", &self.subcommands)
            .field("schema", &self.schema)
            .finish()
    }
}

/// A command as stored in the registry.
#[derive(Clone)]
pub struct CommandEntry {
    /// Fully-qualified path.
    pub path: CommandPath,
    /// Human-readable description.
    pub description: String,
    /// Body run on execution.
    pub handler: Option<Arc<dyn CommandHandler>>,
    /// Expected arguments.
    pub schema: Option<Arc<ValidationSchema>>,
}

impl CommandEntry {
    pub(crate) fn from_command(command: &Command, path: CommandPath) -> Self {
        Self {
            path,
            description: command.description.clone(),
            handler: command.handler.clone(),
            schema: command.schema.clone(),
        }
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.name().unwrap_or_default()
    }

    /// Whether executing this command runs anything.
    pub fn is_executable(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("path", &self.path.to_string())
            .field("description", &self.description)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
