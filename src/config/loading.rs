use std::{fs, path::Path};

use schemars::schema_for;
use tracing::{debug, instrument};

use super::{ConfigPaths, PaletteConfig};
use crate::{PaletteError, Result};

impl PaletteConfig {
    /// Loads the configuration from a TOML file.
    ///
    /// A missing file is not an error: the palette runs on defaults until
    /// the user creates one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The TOML content is invalid
    /// - The TOML does not match the configuration schema
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| PaletteError::io_at(e, path))?;
        Self::parse(&content, Some(path))
    }

    /// Loads the configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined or the
    /// file is invalid.
    pub fn load_default() -> Result<Self> {
        let path = ConfigPaths::main_config()?;
        Self::load(&path)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `TomlParseError` for malformed TOML and `ConfigValidation`
    /// when values have the wrong shape.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, None)
    }

    /// Renders the JSON schema of the configuration file.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be serialized.
    pub fn json_schema() -> Result<String> {
        let schema = schema_for!(PaletteConfig);
        serde_json::to_string_pretty(&schema).map_err(|e| PaletteError::ConfigValidation {
            component: "schema".to_string(),
            details: e.to_string(),
        })
    }

    fn parse(content: &str, path: Option<&Path>) -> Result<Self> {
        let value: toml::Value =
            toml::from_str(content).map_err(|e| PaletteError::toml_parse(e, path))?;

        value
            .try_into()
            .map_err(|e| PaletteError::ConfigValidation {
                component: "config parsing".to_string(),
                details: format!("Configuration validation failed: {e}"),
            })
    }
}
