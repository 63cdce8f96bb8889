//! cmdpalette - Command palette core.
//!
//! Provides the pieces behind a terminal-style command palette:
//!
//! - Hierarchical command registry addressed by dotted paths
//! - Declarative argument validation with typed parsing
//! - Closed error taxonomy with a pluggable error handler and bounded log
//! - Palette front end tying input, execution, and history together
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cmdpalette::{
//!     palette::CommandPalette,
//!     registry::{Command, CommandResponse, HandlerResult, Invocation},
//! };
//!
//! async fn hello(invocation: Invocation) -> HandlerResult {
//!     Ok(CommandResponse::text(format!("hello {}", invocation.args.join(" "))))
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut palette = CommandPalette::new();
//! palette
//!     .registry_mut()
//!     .register_command(Command::new("hello", "Say hello").handler(hello))?;
//!
//! let response = palette.run(":hello world").await?;
//! println!("{response:?}");
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Error taxonomy, error records, and the error handler.
pub mod errors;

/// Palette front end: input parsing, pipeline, history, rendering.
pub mod palette;

/// Command tree, handlers, and dispatch.
pub mod registry;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Argument validation engine.
pub mod validation;

/// Re-exported core types for convenience.
pub use core::{PaletteError, Result};
