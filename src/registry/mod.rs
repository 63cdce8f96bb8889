//! Hierarchical command registry.
//!
//! Commands form a tree addressed by dot-qualified paths such as
//! `git.commit`. The registry owns every registered node, rejects duplicate
//! paths, and dispatches invocations to command handlers.

mod command;
mod command_registry;
mod error;
mod path;
mod response;
mod tree;


pub use command::{Command, CommandEntry, CommandHandler, HandlerResult, Invocation};
pub use command_registry::CommandRegistry;
pub use error::RegistryError;
pub use path::CommandPath;
pub use response::{CommandResponse, ResponseKind};
