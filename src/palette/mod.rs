//! Command palette front end.
//!
//! Turns raw input lines into command invocations and runs them through
//! the full pipeline: resolution against the registry, schema validation,
//! execution, history, and error handling.

pub mod formatting;
mod history;
mod input;
mod service;


pub use history::{HistoryEntry, Outcome};
pub use input::{ParsedInput, parse_input};
pub use service::CommandPalette;
