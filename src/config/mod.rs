//! Configuration schema definitions and loading.
//!
//! Defines the TOML configuration for the palette: logging, the bounded
//! error log, and input resolution behaviour. Every field has a default,
//! so an empty or missing file yields a working configuration.

mod error_log;
mod general;
mod loading;
mod palette;
mod paths;


pub use error_log::{DEFAULT_ERROR_LOG_CAPACITY, ErrorLogConfig};
pub use general::{GeneralConfig, LogLevel};
pub use palette::PaletteSettings;
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the palette.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct PaletteConfig {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Error log settings.
    #[serde(default)]
    pub error_log: ErrorLogConfig,

    /// Input resolution and history settings.
    #[serde(default)]
    pub palette: PaletteSettings,
}
