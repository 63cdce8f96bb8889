//! Error taxonomy and error handling pipeline.
//!
//! Every failure of the command pipeline is a [`CommandError`] whose
//! [`ErrorKind`] carries the context for one of the nine stable
//! [`ErrorCode`]s. Errors flow once through the [`ErrorHandler`], which
//! records them in a bounded log and dispatches code-specific actions.

mod code;
mod error;
mod handler;
mod record;

#[cfg(test)]
mod tests;

pub use code::ErrorCode;
pub use error::{BoxError, CommandError, ErrorKind};
pub use handler::{ErrorAction, ErrorHandler};
pub(crate) use handler::panic_message;
pub use record::ErrorRecord;
