use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

/// Error types for the palette's ambient layers.
///
/// Covers configuration loading and file system access. Failures of the
/// command pipeline itself are modelled by [`crate::errors::CommandError`].
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for palette setup operations.
pub type Result<T> = result::Result<T, PaletteError>;

impl PaletteError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        PaletteError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error that remembers which path was being accessed.
    pub fn io_at(error: impl fmt::Display, path: &Path) -> Self {
        PaletteError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
